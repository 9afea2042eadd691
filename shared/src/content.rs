//! 首页展示用的只读内容

use crate::date::Timestamp;
use crate::{DEFAULT_BUSINESS_HOURS, format_ksh};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessAbout {
    pub name: String,
    pub short_name: String,
    pub details: String,
    pub slogan: String,
    pub address: String,
    pub founded_in: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub wallpaper: Option<String>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub business_hours: Option<String>,
}

impl BusinessAbout {
    /// 补上缺失的营业时间
    pub fn with_default_hours(mut self) -> Self {
        if self.business_hours.is_none() {
            self.business_hours = Some(DEFAULT_BUSINESS_HOURS.to_string());
        }
        self
    }

    /// 已配置的社交链接 `(名称, URL)`
    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        [
            ("Facebook", &self.facebook),
            ("Twitter", &self.twitter),
            ("Instagram", &self.instagram),
            ("LinkedIn", &self.linkedin),
            ("YouTube", &self.youtube),
            ("TikTok", &self.tiktok),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.as_ref().map(|u| (name, u.clone())))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffered {
    pub name: String,
    pub description: String,
    pub picture: String,
    pub starting_price: f64,
    pub ending_price: f64,
}

impl ServiceOffered {
    pub fn price_range(&self) -> String {
        format!(
            "{} - {}",
            format_ksh(self.starting_price),
            format_ksh(self.ending_price)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShallowCompletedOrder {
    pub id: u64,
    pub picture: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrderDetail {
    pub id: u64,
    #[serde(default)]
    pub picture: Option<String>,
    pub service_name: String,
    pub details: String,
    pub material_type: String,
    pub fabric_required: bool,
    #[serde(default)]
    pub reference_image: Option<String>,
    pub charges: f64,
    pub created_at: Timestamp,
}

// =========================================================
// 客户评价 (Testimonials)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackRate {
    Excellent,
    Good,
    Average,
    Poor,
    Terrible,
    #[serde(other)]
    Unknown,
}

impl FeedbackRate {
    pub fn stars(&self) -> u8 {
        match self {
            FeedbackRate::Excellent => 5,
            FeedbackRate::Good => 4,
            FeedbackRate::Average => 3,
            FeedbackRate::Poor => 2,
            FeedbackRate::Terrible => 1,
            FeedbackRate::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackUser {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub profile: Option<String>,
}

impl FeedbackUser {
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.trim().is_empty() {
            "Anonymous".to_string()
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    pub id: u64,
    pub message: String,
    pub rate: FeedbackRate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user: FeedbackUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// `POST /message` 请求体
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub sender: String,
    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_rate_has_no_stars() {
        let rate: FeedbackRate = serde_json::from_value(json!("Superb")).unwrap();
        assert_eq!(rate, FeedbackRate::Unknown);
        assert_eq!(rate.stars(), 0);
        assert_eq!(FeedbackRate::Good.stars(), 4);
    }

    #[test]
    fn test_default_hours_only_fill_missing() {
        let about = BusinessAbout::default().with_default_hours();
        assert_eq!(about.business_hours.as_deref(), Some(DEFAULT_BUSINESS_HOURS));

        let custom = BusinessAbout {
            business_hours: Some("24/7".into()),
            ..Default::default()
        }
        .with_default_hours();
        assert_eq!(custom.business_hours.as_deref(), Some("24/7"));
    }

    #[test]
    fn test_price_range() {
        let service = ServiceOffered {
            name: "Alterations".into(),
            description: String::new(),
            picture: String::new(),
            starting_price: 500.0,
            ending_price: 2500.0,
        };
        assert_eq!(service.price_range(), "Ksh 500 - Ksh 2,500");
    }

    #[test]
    fn test_social_links_skip_missing() {
        let about = BusinessAbout {
            facebook: Some("https://fb.example".into()),
            tiktok: Some("https://tt.example".into()),
            ..Default::default()
        };
        let names: Vec<_> = about.social_links().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Facebook", "TikTok"]);
    }
}

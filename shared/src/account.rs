//! 用户账户相关记录：资料、身体尺寸、注册表单

use crate::date::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// 用户资料 (Profile)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    #[serde(rename = "M", alias = "male")]
    Male,
    #[serde(rename = "F", alias = "female")]
    Female,
    #[serde(rename = "O", alias = "other")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// 表单 `<select>` 使用的取值
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    pub date_joined: Timestamp,
}

impl UserProfile {
    /// 优先展示姓名，缺失时回退到用户名
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }

    /// 从当前资料生成可编辑字段的更新请求
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.clone().unwrap_or_default()),
            last_name: Some(self.last_name.clone().unwrap_or_default()),
            phone_number: Some(self.phone_number.clone().unwrap_or_default()),
            email: Some(self.email.clone().unwrap_or_default()),
            location: Some(self.location.clone().unwrap_or_default()),
        }
    }
}

/// `PATCH /profile` 请求体，`None` 字段不序列化
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// =========================================================
// 身体尺寸 (Measurements)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMeasurements {
    #[serde(default)]
    pub chest: f64,
    #[serde(default)]
    pub waist: f64,
    #[serde(default)]
    pub hips: f64,
    #[serde(default)]
    pub inseam: f64,
    #[serde(default)]
    pub neck: f64,
    #[serde(default)]
    pub sleeve_length: f64,
    #[serde(default)]
    pub shoulder_width: f64,
    #[serde(default)]
    pub thigh: f64,
    #[serde(default)]
    pub calf: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<Timestamp>,
}

impl UserMeasurements {
    pub fn to_update(&self) -> MeasurementsUpdate {
        let mut update = MeasurementsUpdate::default();
        for field in MeasurementField::ALL {
            update.set(field, field.get(self));
        }
        update
    }
}

/// `PATCH /measurements` 请求体
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeve_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thigh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calf: Option<f64>,
}

impl MeasurementsUpdate {
    fn set(&mut self, field: MeasurementField, value: f64) {
        let slot = match field {
            MeasurementField::Chest => &mut self.chest,
            MeasurementField::Waist => &mut self.waist,
            MeasurementField::Hips => &mut self.hips,
            MeasurementField::Inseam => &mut self.inseam,
            MeasurementField::Neck => &mut self.neck,
            MeasurementField::SleeveLength => &mut self.sleeve_length,
            MeasurementField::ShoulderWidth => &mut self.shoulder_width,
            MeasurementField::Thigh => &mut self.thigh,
            MeasurementField::Calf => &mut self.calf,
        };
        *slot = Some(value);
    }
}

/// 尺寸表单的字段表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementField {
    Chest,
    Waist,
    Hips,
    Inseam,
    Neck,
    SleeveLength,
    ShoulderWidth,
    Thigh,
    Calf,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 9] = [
        MeasurementField::Chest,
        MeasurementField::Waist,
        MeasurementField::Hips,
        MeasurementField::Inseam,
        MeasurementField::Neck,
        MeasurementField::SleeveLength,
        MeasurementField::ShoulderWidth,
        MeasurementField::Thigh,
        MeasurementField::Calf,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MeasurementField::Chest => "chest",
            MeasurementField::Waist => "waist",
            MeasurementField::Hips => "hips",
            MeasurementField::Inseam => "inseam",
            MeasurementField::Neck => "neck",
            MeasurementField::SleeveLength => "sleeve_length",
            MeasurementField::ShoulderWidth => "shoulder_width",
            MeasurementField::Thigh => "thigh",
            MeasurementField::Calf => "calf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeasurementField::Chest => "Chest",
            MeasurementField::Waist => "Waist",
            MeasurementField::Hips => "Hips",
            MeasurementField::Inseam => "Inseam",
            MeasurementField::Neck => "Neck",
            MeasurementField::SleeveLength => "Sleeve Length",
            MeasurementField::ShoulderWidth => "Shoulder Width",
            MeasurementField::Thigh => "Thigh",
            MeasurementField::Calf => "Calf",
        }
    }

    pub fn get(&self, m: &UserMeasurements) -> f64 {
        match self {
            MeasurementField::Chest => m.chest,
            MeasurementField::Waist => m.waist,
            MeasurementField::Hips => m.hips,
            MeasurementField::Inseam => m.inseam,
            MeasurementField::Neck => m.neck,
            MeasurementField::SleeveLength => m.sleeve_length,
            MeasurementField::ShoulderWidth => m.shoulder_width,
            MeasurementField::Thigh => m.thigh,
            MeasurementField::Calf => m.calf,
        }
    }

    pub fn set(&self, m: &mut UserMeasurements, value: f64) {
        let slot = match self {
            MeasurementField::Chest => &mut m.chest,
            MeasurementField::Waist => &mut m.waist,
            MeasurementField::Hips => &mut m.hips,
            MeasurementField::Inseam => &mut m.inseam,
            MeasurementField::Neck => &mut m.neck,
            MeasurementField::SleeveLength => &mut m.sleeve_length,
            MeasurementField::ShoulderWidth => &mut m.shoulder_width,
            MeasurementField::Thigh => &mut m.thigh,
            MeasurementField::Calf => &mut m.calf,
        };
        *slot = value;
    }

    /// 男性用户不显示臀围，仅影响界面
    pub fn visible_for(&self, gender: Option<Gender>) -> bool {
        !(matches!(self, MeasurementField::Hips) && gender == Some(Gender::Male))
    }
}

// =========================================================
// 注册 (Registration)
// =========================================================

/// `POST /d/user/create` 的表单字段
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub location: String,
    pub password: String,
}

impl RegisterForm {
    /// 按后端表单字段顺序展开
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("date_of_birth", self.date_of_birth.clone()),
            ("gender", self.gender.code().to_string()),
            ("username", self.username.clone()),
            ("email", self.email.clone()),
            ("phone_number", self.phone_number.clone()),
            ("location", self.location.clone()),
            ("password", self.password.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_json() -> serde_json::Value {
        json!({
            "first_name": "Jane",
            "last_name": null,
            "phone_number": "+254700000000",
            "email": "jane@example.com",
            "location": "Nairobi",
            "username": "jane",
            "date_of_birth": "1990-01-01",
            "gender": "F",
            "profile": null,
            "is_staff": false,
            "date_joined": "2023-01-01T00:00:00"
        })
    }

    #[test]
    fn test_profile_deserialize() {
        let profile: UserProfile = serde_json::from_value(profile_json()).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.display_name(), "Jane");
        assert!(!profile.is_staff);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut value = profile_json();
        value["first_name"] = json!("  ");
        let profile: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(profile.display_name(), "jane");
    }

    #[test]
    fn test_profile_update_skips_none() {
        let update = ProfileUpdate {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "email": "new@example.com" }));
    }

    #[test]
    fn test_hips_hidden_for_male_only() {
        assert!(!MeasurementField::Hips.visible_for(Some(Gender::Male)));
        assert!(MeasurementField::Hips.visible_for(Some(Gender::Female)));
        assert!(MeasurementField::Hips.visible_for(None));
        assert!(MeasurementField::Chest.visible_for(Some(Gender::Male)));
    }

    #[test]
    fn test_measurements_to_update_carries_every_field() {
        let mut m = UserMeasurements::default();
        for (i, field) in MeasurementField::ALL.iter().enumerate() {
            field.set(&mut m, i as f64 + 1.0);
        }
        let update = m.to_update();
        assert_eq!(update.chest, Some(1.0));
        assert_eq!(update.calf, Some(9.0));
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code("O"), Some(Gender::Other));
        assert_eq!(Gender::from_code("X"), None);
        let g: Gender = serde_json::from_value(json!("male")).unwrap();
        assert_eq!(g, Gender::Male);
    }
}

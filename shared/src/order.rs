//! 订单记录
//!
//! - `ShallowOrder`: 列表接口返回的精简记录
//! - `OrderDetails`: 单条查询返回的完整记录

use crate::date::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// 仅待处理订单允许用户修改或删除（后端同样校验）
    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    Cotton,
    Silk,
    Wool,
    Polyester,
}

impl MaterialType {
    pub const ALL: [MaterialType; 4] = [
        MaterialType::Cotton,
        MaterialType::Silk,
        MaterialType::Wool,
        MaterialType::Polyester,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Cotton => "Cotton",
            MaterialType::Silk => "Silk",
            MaterialType::Wool => "Wool",
            MaterialType::Polyester => "Polyester",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShallowOrder {
    pub id: u64,
    pub service_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub charges: Option<f64>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: u64,
    pub service_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub charges: Option<f64>,
    pub status: OrderStatus,
    #[serde(default)]
    pub picture: Option<String>,
    pub details: String,
    pub material_type: MaterialType,
    pub fabric_required: bool,
    #[serde(default)]
    pub reference_image: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub charges_paid: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderDetails {
    pub fn to_shallow(&self) -> ShallowOrder {
        ShallowOrder {
            id: self.id,
            service_name: self.service_name.clone(),
            quantity: self.quantity,
            charges: self.charges,
            status: self.status,
        }
    }

    /// 尚未支付的金额；未报价时为 `None`
    pub fn balance(&self) -> Option<f64> {
        self.charges.map(|c| (c - self.charges_paid).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        let s: OrderStatus = serde_json::from_value(json!("In Progress")).unwrap();
        assert_eq!(s, OrderStatus::InProgress);
        assert_eq!(serde_json::to_value(OrderStatus::InProgress).unwrap(), json!("In Progress"));
        assert!(OrderStatus::Pending.is_editable());
        assert!(!OrderStatus::Completed.is_editable());
    }

    #[test]
    fn test_details_to_shallow_and_balance() {
        let details: OrderDetails = serde_json::from_value(json!({
            "id": 7,
            "service_name": "Custom Suits",
            "quantity": 2,
            "charges": 12000.0,
            "status": "Pending",
            "details": "Navy two-piece",
            "material_type": "Wool",
            "fabric_required": true,
            "reference_image": null,
            "urgency": "High",
            "charges_paid": 5000.0,
            "created_at": "2024-01-01T09:00:00",
            "updated_at": "2024-01-02T09:00:00"
        }))
        .unwrap();

        let shallow = details.to_shallow();
        assert_eq!(shallow.id, 7);
        assert_eq!(shallow.quantity, 2);
        assert_eq!(details.balance(), Some(7000.0));
    }

    #[test]
    fn test_shallow_without_charges() {
        let order: ShallowOrder = serde_json::from_value(json!({
            "id": 1, "service_name": "Alterations", "quantity": 1, "charges": null, "status": "Pending"
        }))
        .unwrap();
        assert_eq!(order.charges, None);
    }
}

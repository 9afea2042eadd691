//! 控制面板订单流程
//!
//! 草稿模型、本地订单列表，以及创建/编辑/删除/查看操作。
//! 网络操作返回 `OrderChange`，由调用方应用到 `OrderBook`，
//! 这样并发的多个操作不会互相覆盖列表。

use crate::api::AtelierApi;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, Part, UploadFile};
use crate::session::TokenStore;
use atelier_shared::{MaterialType, OrderDetails, ShallowOrder, Urgency};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this order?";

/// 删除前的确认
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

// =========================================================
// 草稿 (Draft)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub service_name: String,
    pub details: String,
    pub material_type: Option<MaterialType>,
    pub fabric_required: bool,
    pub quantity: u32,
    pub urgency: Urgency,
    pub colors: String,
    pub reference_image: Option<UploadFile>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            details: String::new(),
            material_type: None,
            fabric_required: false,
            quantity: 1,
            urgency: Urgency::default(),
            colors: String::new(),
            reference_image: None,
        }
    }
}

impl OrderDraft {
    /// 用已有订单的全部可编辑字段填充草稿
    ///
    /// 参考图只存在于服务端，不回填。
    pub fn from_details(order: &OrderDetails) -> Self {
        Self {
            service_name: order.service_name.clone(),
            details: order.details.clone(),
            material_type: Some(order.material_type),
            fabric_required: order.fabric_required,
            quantity: order.quantity.max(1),
            urgency: order.urgency,
            colors: order.colors.clone().unwrap_or_default(),
            reference_image: None,
        }
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(ApiError::validation("Please select a service"));
        }
        if self.details.trim().is_empty() {
            return Err(ApiError::validation("Please describe your order"));
        }
        if self.material_type.is_none() {
            return Err(ApiError::validation("Please select a material type"));
        }
        if self.quantity < 1 {
            return Err(ApiError::validation("Quantity must be at least 1"));
        }
        Ok(())
    }

    /// 展开为 multipart 字段，只包含有值的字段
    pub fn to_parts(&self) -> Vec<Part> {
        let mut parts = vec![
            Part::text("service_name", self.service_name.trim()),
            Part::text("details", self.details.trim()),
        ];
        if let Some(material) = self.material_type {
            parts.push(Part::text("material_type", material.as_str()));
        }
        parts.push(Part::text("fabric_required", self.fabric_required.to_string()));
        parts.push(Part::text("quantity", self.quantity.to_string()));
        parts.push(Part::text("urgency", self.urgency.as_str()));

        let colors = self.colors.trim();
        if !colors.is_empty() {
            parts.push(Part::text("colors", colors));
        }
        if let Some(file) = &self.reference_image {
            parts.push(Part::file("reference_image", file.clone()));
        }
        parts
    }
}

/// 参考图读取进度
///
/// 每次选择文件领取一个序号，只有最新序号的读取结果生效；读取未完成时不允许提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadTicket {
    generation: u32,
    pending: bool,
}

impl UploadTicket {
    pub fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.generation
    }

    /// 读取结束；返回该结果是否仍应写入表单
    pub fn finish(&mut self, ticket: u32) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.pending = false;
        true
    }

    /// 表单重置或清空文件时作废进行中的读取
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

// =========================================================
// 订单列表 (Order Book)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderChange {
    Created(ShallowOrder),
    Updated(ShallowOrder),
    Removed(u64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBook {
    pub orders: Vec<ShallowOrder>,
}

impl OrderBook {
    pub fn new(orders: Vec<ShallowOrder>) -> Self {
        Self { orders }
    }

    pub fn apply(&mut self, change: OrderChange) {
        match change {
            OrderChange::Created(order) => self.orders.insert(0, order),
            OrderChange::Updated(order) => {
                if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
                    *slot = order;
                }
            }
            OrderChange::Removed(id) => self.orders.retain(|o| o.id != id),
        }
    }

    #[cfg(test)]
    pub fn get(&self, id: u64) -> Option<&ShallowOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =========================================================
// 订单操作
// =========================================================

pub async fn create_order<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    draft: &OrderDraft,
) -> ApiResult<OrderChange> {
    draft.validate()?;
    let created = api.create_order(draft.to_parts()).await?;
    tracing::info!(id = created.id, "order created");
    Ok(OrderChange::Created(created.to_shallow()))
}

/// 打开编辑：拉取订单详情并填充草稿
pub async fn begin_edit<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    id: u64,
) -> ApiResult<OrderDraft> {
    let details = api.order_details(id).await?;
    Ok(OrderDraft::from_details(&details))
}

pub async fn submit_edit<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    id: u64,
    draft: &OrderDraft,
) -> ApiResult<OrderChange> {
    draft.validate()?;
    let updated = api.update_order(id, draft.to_parts()).await?;
    tracing::info!(id, "order updated");
    Ok(OrderChange::Updated(updated.to_shallow()))
}

/// 删除订单；用户取消时返回 `Ok(None)` 且不发请求
pub async fn delete_order<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    id: u64,
    confirm: &impl Confirm,
) -> ApiResult<Option<OrderChange>> {
    if !confirm.confirm(DELETE_CONFIRMATION) {
        return Ok(None);
    }
    api.delete_order(id).await?;
    tracing::info!(id, "order deleted");
    Ok(Some(OrderChange::Removed(id)))
}

pub async fn view_order<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    id: u64,
) -> ApiResult<OrderDetails> {
    api.order_details(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{order_json, test_api};
    use crate::request::HttpBody;
    use crate::session::MemoryTokenStore;
    use atelier_shared::{HttpMethod, OrderStatus};
    use serde_json::json;
    use std::cell::Cell;

    fn shallow(id: u64) -> ShallowOrder {
        ShallowOrder {
            id,
            service_name: "Suit".into(),
            quantity: 1,
            charges: None,
            status: OrderStatus::Pending,
        }
    }

    fn filled_draft() -> OrderDraft {
        OrderDraft {
            service_name: "Suit".into(),
            details: "X".into(),
            material_type: Some(MaterialType::Cotton),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_defaults() {
        let draft = OrderDraft::default();
        assert_eq!(draft.quantity, 1);
        assert_eq!(draft.urgency, Urgency::Medium);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_pending_upload_blocks_until_latest_read_finishes() {
        let mut upload = UploadTicket::default();
        assert!(!upload.is_pending());

        let first = upload.begin();
        let second = upload.begin();
        assert!(upload.is_pending());

        assert!(!upload.finish(first));
        assert!(upload.is_pending());
        assert!(upload.finish(second));
        assert!(!upload.is_pending());
    }

    #[test]
    fn test_cancelled_upload_result_is_dropped() {
        let mut upload = UploadTicket::default();
        let ticket = upload.begin();
        upload.cancel();

        assert!(!upload.is_pending());
        assert!(!upload.finish(ticket));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut draft = filled_draft();
        draft.quantity = 4;
        draft.reset();
        assert_eq!(draft, OrderDraft::default());
    }

    #[test]
    fn test_parts_skip_empty_optional_fields() {
        let parts = filled_draft().to_parts();
        let names: Vec<&str> = parts.iter().map(Part::name).collect();
        assert_eq!(
            names,
            vec![
                "service_name",
                "details",
                "material_type",
                "fabric_required",
                "quantity",
                "urgency"
            ]
        );
        assert!(parts.contains(&Part::text("fabric_required", "false")));
    }

    #[test]
    fn test_book_apply() {
        let mut book = OrderBook::new(vec![shallow(1), shallow(2)]);

        book.apply(OrderChange::Created(shallow(3)));
        assert_eq!(book.orders[0].id, 3);

        let mut changed = shallow(2);
        changed.quantity = 5;
        book.apply(OrderChange::Updated(changed));
        assert_eq!(book.get(2).unwrap().quantity, 5);

        book.apply(OrderChange::Removed(1));
        assert!(book.get(1).is_none());
        assert_eq!(book.orders.len(), 2);
    }

    #[tokio::test]
    async fn test_create_with_reference_image_sends_file_part() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Post, "/api/v1/order", 200, order_json(7, "X", "Cotton"));

        let mut draft = filled_draft();
        draft.reference_image = Some(UploadFile {
            file_name: "ref.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        });

        let change = create_order(&api, &draft).await.unwrap();
        assert!(matches!(change, OrderChange::Created(ref o) if o.id == 7));

        let req = client.last_request().unwrap();
        let HttpBody::Multipart(parts) = req.body else {
            panic!("expected multipart body");
        };
        let files: Vec<&Part> = parts
            .iter()
            .filter(|p| matches!(p, Part::File { .. }))
            .collect();
        assert_eq!(files.len(), 1);
        match files[0] {
            Part::File { name, file } => {
                assert_eq!(name, "reference_image");
                assert_eq!(file.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
            }
            Part::Text { .. } => unreachable!(),
        }
        assert!(
            parts
                .iter()
                .all(|p| matches!(p, Part::File { .. }) || p.name() != "reference_image")
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));

        let err = create_order(&api, &OrderDraft::default()).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        let mut book = OrderBook::new(vec![shallow(1)]);
        let asked = Cell::new(false);
        let decline = |message: &str| {
            assert_eq!(message, DELETE_CONFIRMATION);
            asked.set(true);
            false
        };

        let change = delete_order(&api, 1, &decline).await.unwrap();
        if let Some(change) = change {
            book.apply(change);
        }

        assert!(asked.get());
        assert_eq!(client.request_count(), 0);
        assert_eq!(book.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_order() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(
            HttpMethod::Delete,
            "/api/v1/order/1",
            200,
            json!({"detail": "Order deleted succesfully."}),
        );
        let mut book = OrderBook::new(vec![shallow(1), shallow(2)]);

        let change = delete_order(&api, 1, &|_: &str| true).await.unwrap().unwrap();
        book.apply(change);

        assert_eq!(client.request_keys(), vec!["DELETE /api/v1/order/1"]);
        assert_eq!(book.orders, vec![shallow(2)]);
    }

    #[tokio::test]
    async fn test_delete_ignores_success_body() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Delete, "/api/v1/order/2", 200, json!(null));

        let change = delete_order(&api, 2, &|_: &str| true).await.unwrap();
        assert_eq!(change, Some(OrderChange::Removed(2)));
    }

    #[tokio::test]
    async fn test_delete_of_non_pending_order_surfaces_detail() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(
            HttpMethod::Delete,
            "/api/v1/order/3",
            404,
            json!({"detail": "Order with id 3 does not exist or is not pending."}),
        );

        let err = delete_order(&api, 3, &|_: &str| true).await.unwrap_err();
        assert_eq!(
            err.user_message("Failed to delete order"),
            "Order with id 3 does not exist or is not pending."
        );
    }

    #[tokio::test]
    async fn test_edit_hydrates_all_fields() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Post, "/api/v1/order", 200, order_json(9, "X", "Cotton"));
        client.mock_response(HttpMethod::Get, "/api/v1/order/9", 200, order_json(9, "X", "Cotton"));

        let mut book = OrderBook::default();
        book.apply(create_order(&api, &filled_draft()).await.unwrap());

        let draft = begin_edit(&api, book.orders[0].id).await.unwrap();

        assert_eq!(draft.details, "X");
        assert_eq!(draft.material_type, Some(MaterialType::Cotton));
        assert!(draft.fabric_required);
        assert_eq!(draft.urgency, Urgency::High);
        assert_eq!(draft.colors, "Navy");
    }

    #[tokio::test]
    async fn test_submit_edit_replaces_entry() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        let mut updated = order_json(1, "Longer sleeves", "Wool");
        updated["quantity"] = json!(3);
        client.mock_response(HttpMethod::Patch, "/api/v1/order/1", 200, updated);
        let mut book = OrderBook::new(vec![shallow(1)]);

        let mut draft = filled_draft();
        draft.quantity = 3;
        book.apply(submit_edit(&api, 1, &draft).await.unwrap());

        assert_eq!(book.get(1).unwrap().quantity, 3);
        assert_eq!(client.request_keys(), vec!["PATCH /api/v1/order/1"]);
    }
}

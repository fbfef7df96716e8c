//! Mapping from Gelato's fulfillment lifecycle to the internal order status.

use crate::db_types::OrderStatusType;

/// Map a vendor fulfillment status string onto the internal status enum.
///
/// Gelato's vocabulary is larger than ours and changes without notice, so anything unrecognised maps to
/// `Processing` rather than failing the webhook.
pub fn map_fulfillment_status(vendor_status: &str) -> OrderStatusType {
    match vendor_status {
        "printed" => OrderStatusType::InProgress,
        "shipped" => OrderStatusType::Shipped,
        "canceled" => OrderStatusType::Cancelled,
        "delivered" => OrderStatusType::Completed,
        _ => OrderStatusType::Processing,
    }
}

#[cfg(test)]
mod test {
    use super::map_fulfillment_status;
    use crate::db_types::OrderStatusType;

    #[test]
    fn known_statuses() {
        assert_eq!(map_fulfillment_status("printed"), OrderStatusType::InProgress);
        assert_eq!(map_fulfillment_status("shipped"), OrderStatusType::Shipped);
        assert_eq!(map_fulfillment_status("canceled"), OrderStatusType::Cancelled);
        assert_eq!(map_fulfillment_status("delivered"), OrderStatusType::Completed);
    }

    #[test]
    fn unknown_statuses_default_to_processing() {
        assert_eq!(map_fulfillment_status("created"), OrderStatusType::Processing);
        assert_eq!(map_fulfillment_status("passed"), OrderStatusType::Processing);
        assert_eq!(map_fulfillment_status(""), OrderStatusType::Processing);
    }

    // Near-miss vendor strings must fall through to `Processing`, never to a terminal status. A stray `failed`
    // must not cancel a paid order.
    #[test]
    fn unlisted_vendor_synonyms_are_not_mapped() {
        assert_eq!(map_fulfillment_status("in_production"), OrderStatusType::Processing);
        assert_eq!(map_fulfillment_status("in_transit"), OrderStatusType::Processing);
        assert_eq!(map_fulfillment_status("failed"), OrderStatusType::Processing);
        assert_eq!(map_fulfillment_status("cancelled"), OrderStatusType::Processing);
    }
}

use crate::format;
use crate::i18n::MessageKey;
use crate::models::{CreateReceivePiecesRequest, UpdateReceivePiecesRequest};
use crate::validation::FieldErrors;

/// Receiving form rules. The batch comes from a picker, so "required"
/// means no batch was selected (an empty denormalized name). The receive
/// date is the strictest date field: besides the day/month ranges its
/// year must sit within 2000..=2100.
pub fn validate_create(data: &CreateReceivePiecesRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if data.batch_name.trim().is_empty() {
        errors.insert("batch_id", MessageKey::ReceiveBatchRequired);
    }
    if data.pieces_received <= 0 {
        errors.insert("pieces_received", MessageKey::ReceivePiecesRequired);
    }
    if let Some(key) = receive_date_error(&data.receive_date) {
        errors.insert("receive_date", key);
    }
    errors
}

pub fn validate_update(data: &UpdateReceivePiecesRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = data.batch_name.as_deref() {
        if name.trim().is_empty() {
            errors.insert("batch_id", MessageKey::ReceiveBatchRequired);
        }
    }
    if let Some(pieces) = data.pieces_received {
        if pieces <= 0 {
            errors.insert("pieces_received", MessageKey::ReceivePiecesRequired);
        }
    }
    if let Some(date) = data.receive_date.as_deref() {
        if let Some(key) = receive_date_error(date) {
            errors.insert("receive_date", key);
        }
    }
    errors
}

fn receive_date_error(raw: &str) -> Option<MessageKey> {
    if raw.is_empty() {
        return Some(MessageKey::ReceiveDateRequired);
    }
    match format::parse_date(raw) {
        None => Some(MessageKey::ReceiveDateInvalid),
        Some(date) if !(2000..=2100).contains(&date.year) => Some(MessageKey::ReceiveDateInvalid),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use uuid::Uuid;

    fn draft() -> CreateReceivePiecesRequest {
        CreateReceivePiecesRequest {
            batch_id: Uuid::new_v4(),
            batch_name: "Lote 07".into(),
            workshop_id: None,
            workshop_name: None,
            pieces_received: 30,
            receive_date: "05/06/2024".into(),
            quality: Default::default(),
            observations: None,
        }
    }

    #[test]
    fn complete_draft_passes() {
        assert!(validate_create(&draft()).is_empty());
    }

    #[test]
    fn missing_batch_selection_is_flagged() {
        let mut data = draft();
        data.batch_name = "  ".into();
        assert_eq!(
            validate_create(&data).get("batch_id"),
            Some(&MessageKey::ReceiveBatchRequired)
        );
    }

    #[test]
    fn empty_date_is_required_not_invalid() {
        let mut data = draft();
        data.receive_date = String::new();
        assert_eq!(
            validate_create(&data).get("receive_date"),
            Some(&MessageKey::ReceiveDateRequired)
        );
    }

    #[test_case("05-06-2024" ; "wrong separator")]
    #[test_case("5/6/2024" ; "missing zero padding")]
    #[test_case("32/06/2024" ; "day out of range")]
    #[test_case("05/13/2024" ; "month out of range")]
    #[test_case("05/06/1999" ; "year below floor")]
    #[test_case("05/06/2101" ; "year above ceiling")]
    fn malformed_or_out_of_range_dates_are_invalid(date: &str) {
        let mut data = draft();
        data.receive_date = date.into();
        assert_eq!(
            validate_create(&data).get("receive_date"),
            Some(&MessageKey::ReceiveDateInvalid)
        );
    }

    #[test]
    fn range_only_check_accepts_impossible_calendar_dates() {
        let mut data = draft();
        data.receive_date = "31/02/2024".into();
        assert!(validate_create(&data).is_empty());
    }

    #[test]
    fn year_boundaries_are_inclusive() {
        for year in ["2000", "2100"] {
            let mut data = draft();
            data.receive_date = format!("05/06/{year}");
            assert!(validate_create(&data).is_empty(), "year {year}");
        }
    }

    #[test]
    fn update_checks_only_present_fields() {
        let patch = UpdateReceivePiecesRequest {
            pieces_received: Some(-1),
            ..Default::default()
        };
        let errors = validate_update(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["pieces_received"], MessageKey::ReceivePiecesRequired);
    }
}

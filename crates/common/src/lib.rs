pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn generic_message_serializes_message_field() {
        let m = types::GenericMessage::new(format!("Record {} deleted", 7));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Record 7 deleted" }));
    }
}

use pet_portrait_engine::db_types::NewCustomer;
pub use pet_portrait_engine::test_utils::prepare_env::new_test_database;

pub fn sample_customer(email: &str) -> NewCustomer {
    NewCustomer {
        email: email.to_string(),
        first_name: "Penny".to_string(),
        last_name: "Whistler".to_string(),
        address_line1: "14 Biscuit Lane".to_string(),
        address_line2: None,
        city: "Portland".to_string(),
        state: Some("OR".to_string()),
        postal_code: "97205".to_string(),
        country: "US".to_string(),
    }
}

pub mod gelato;
pub mod paypal;

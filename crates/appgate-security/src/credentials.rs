//! Application credential generation
//!
//! The `app_id` is a public identifier; the `app_key` is the secret half
//! of the pair and never appears in logs or list views.

use rand::RngCore;
use uuid::Uuid;

pub fn generate_app_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn generate_app_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

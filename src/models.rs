use serde::{Deserialize, Serialize};

/// Access-token claims. Tokens are issued by the identity service; this
/// backend only verifies them and reads the audit identity and the granted
/// permission strings.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub sub: String,
    pub exp: usize,

    #[serde(default)]
    pub permissions: Vec<String>,
}

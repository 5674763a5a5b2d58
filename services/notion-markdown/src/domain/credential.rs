/// Notion APIの認証トークン
///
/// `Authorization: Bearer <token>`から取り出した文字列をそのまま保持する。
/// 中身は解釈しない。ログに漏れないよう`Debug`はマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// トークン文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_returns_token_verbatim() {
        let credential = Credential::new("secret_abc123");
        assert_eq!(credential.as_str(), "secret_abc123");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let credential = Credential::new("secret_abc123");
        let debug_str = format!("{:?}", credential);
        assert!(!debug_str.contains("secret_abc123"));
        assert_eq!(debug_str, "Credential(***)");
    }
}

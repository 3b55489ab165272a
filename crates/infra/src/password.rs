//! # パスワードハッシュ
//!
//! パスワードのハッシュ化と検証を提供する。
//!
//! ## アルゴリズム
//!
//! | 実装 | PHC 識別子 | パラメータ |
//! |------|-----------|-----------|
//! | [`Pbkdf2PasswordChecker`] | `pbkdf2-sha256` | rounds（既定 600,000）、出力 32 バイト |
//! | [`Argon2PasswordChecker`] | `argon2id` | m=64 MB, t=1, p=1 |
//!
//! ハッシュは PHC 形式の文字列で保存する。検証時は保存済みハッシュの
//! 識別子からアルゴリズムを判定するため、設定でアルゴリズムを切り替えても
//! 既存ユーザーはそのままログインできる。
//!
//! ## タイミング攻撃対策
//!
//! ハッシュの比較は `password-hash` の定数時間比較で行う。
//! ユーザーが存在しない場合は [`PasswordChecker::dummy_verify`] で
//! 同等の計算を実行し、処理時間を均一化する。

use account_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};
use argon2::{
    Argon2,
    Params as Argon2Params,
    PasswordHasher as _,
    password_hash::{PasswordHash as PhcHash, SaltString, rand_core::OsRng},
};
use pbkdf2::Pbkdf2;

use crate::InfraError;

/// PBKDF2 の既定反復回数（OWASP 2023 推奨値）
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 600_000;

/// PBKDF2 の出力長（バイト）
const PBKDF2_OUTPUT_LENGTH: usize = 32;

/// ダミー検証に使うパスワード
const DUMMY_PASSWORD: &[u8] = b"dummy-password-for-timing";

/// パスワードハッシュのアルゴリズム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::IntoStaticStr, strum::Display)]
pub enum PasswordAlgorithm {
    /// PBKDF2-HMAC-SHA256
    #[default]
    #[strum(serialize = "pbkdf2-sha256")]
    Pbkdf2Sha256,
    /// Argon2id
    #[strum(serialize = "argon2id")]
    Argon2id,
}

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// 平文パスワードをランダムソルト付きでハッシュ化する
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - 保存済みハッシュが PHC 形式として解析できない場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;

    /// ダミーハッシュで検証を実行する（結果は捨てる）
    ///
    /// ユーザーが存在しない場合にも実際の検証と同じ時間を消費させる。
    fn dummy_verify(&self, password: &PlainPassword);
}

/// 保存済みハッシュの識別子に応じて PBKDF2 / Argon2 のどちらかで検証する
fn verify_phc(
    password: &[u8],
    hash: &str,
) -> Result<PasswordVerifyResult, InfraError> {
    let parsed = PhcHash::new(hash)
        .map_err(|e| InfraError::password_hash(format!("不正なハッシュ形式: {e}")))?;

    let matched = parsed
        .verify_password(&[&Pbkdf2, &Argon2::default()], password)
        .is_ok();

    Ok(PasswordVerifyResult::from(matched))
}

// =============================================================================
// PBKDF2-SHA256
// =============================================================================

/// PBKDF2-HMAC-SHA256 によるパスワードハッシュの実装
pub struct Pbkdf2PasswordChecker {
    params:     pbkdf2::Params,
    dummy_hash: String,
}

impl Pbkdf2PasswordChecker {
    /// 反復回数を指定して作成する
    ///
    /// ダミー検証用のハッシュをここで一度だけ計算する。
    pub fn new(rounds: u32) -> Result<Self, InfraError> {
        let params = pbkdf2::Params {
            rounds,
            output_length: PBKDF2_OUTPUT_LENGTH,
        };
        let dummy_hash = Self::hash_with(params, DUMMY_PASSWORD)?;
        Ok(Self { params, dummy_hash })
    }

    fn hash_with(params: pbkdf2::Params, password: &[u8]) -> Result<String, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Pbkdf2
            .hash_password_customized(password, None, None, params, &salt)
            .map_err(|e| InfraError::password_hash(format!("ハッシュ化に失敗しました: {e}")))?;
        Ok(hash.to_string())
    }
}

impl PasswordChecker for Pbkdf2PasswordChecker {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        Self::hash_with(self.params, password.as_bytes()).map(PasswordHash::new)
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        verify_phc(password.as_bytes(), hash.as_str())
    }

    fn dummy_verify(&self, password: &PlainPassword) {
        let _ = verify_phc(password.as_bytes(), &self.dummy_hash);
    }
}

// =============================================================================
// Argon2id
// =============================================================================

/// Argon2id によるパスワードハッシュの実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordChecker {
    argon2:     Argon2<'static>,
    dummy_hash: String,
}

impl Argon2PasswordChecker {
    pub fn new() -> Result<Self, InfraError> {
        let params = Argon2Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .map_err(|e| InfraError::password_hash(format!("Argon2 パラメータが不正です: {e}")))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        let dummy_hash = Self::hash_with(&argon2, DUMMY_PASSWORD)?;

        Ok(Self { argon2, dummy_hash })
    }

    fn hash_with(argon2: &Argon2<'static>, password: &[u8]) -> Result<String, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(password, &salt)
            .map_err(|e| InfraError::password_hash(format!("ハッシュ化に失敗しました: {e}")))?;
        Ok(hash.to_string())
    }
}

impl PasswordChecker for Argon2PasswordChecker {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        Self::hash_with(&self.argon2, password.as_bytes()).map(PasswordHash::new)
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        verify_phc(password.as_bytes(), hash.as_str())
    }

    fn dummy_verify(&self, password: &PlainPassword) {
        let _ = verify_phc(password.as_bytes(), &self.dummy_hash);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// テストでは反復回数を下げて高速化する
    const TEST_ROUNDS: u32 = 1_000;

    fn plain(value: &str) -> PlainPassword {
        PlainPassword::new(value).unwrap()
    }

    fn pbkdf2_checker() -> Pbkdf2PasswordChecker {
        Pbkdf2PasswordChecker::new(TEST_ROUNDS).unwrap()
    }

    #[rstest]
    fn test_pbkdf2のハッシュは平文と異なりphc形式になる() {
        let hash = pbkdf2_checker().hash(&plain("secret1")).unwrap();

        assert_ne!(hash.as_str(), "secret1");
        assert!(hash.as_str().starts_with("$pbkdf2-sha256$"));
        assert!(hash.as_str().contains("i=1000"));
    }

    #[rstest]
    fn test_pbkdf2で正しいパスワードを検証できる() {
        let checker = pbkdf2_checker();
        let hash = checker.hash(&plain("secret1")).unwrap();

        let result = checker.verify(&plain("secret1"), &hash).unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    #[case("wrong")]
    #[case("secret")]
    #[case("secret1 ")]
    #[case("SECRET1")]
    fn test_pbkdf2で不正なパスワードは不一致になる(#[case] guess: &str) {
        let checker = pbkdf2_checker();
        let hash = checker.hash(&plain("secret1")).unwrap();

        let result = checker.verify(&plain(guess), &hash).unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_同じパスワードでもソルトによりハッシュが異なる() {
        let checker = pbkdf2_checker();
        let first = checker.hash(&plain("secret1")).unwrap();
        let second = checker.hash(&plain("secret1")).unwrap();

        assert_ne!(first, second);
    }

    #[rstest]
    fn test_不正なハッシュ形式はエラー() {
        let checker = pbkdf2_checker();
        let invalid_hash = PasswordHash::new("not-a-valid-hash");

        let result = checker.verify(&plain("secret1"), &invalid_hash);

        assert!(result.is_err());
    }

    #[rstest]
    fn test_平文がそのまま保存されていても一致とはみなさない() {
        let checker = pbkdf2_checker();
        let plaintext_row = PasswordHash::new("secret1");

        let result = checker.verify(&plain("secret1"), &plaintext_row);

        assert!(result.is_err());
    }

    #[rstest]
    fn test_argon2で作成したハッシュをpbkdf2設定でも検証できる() {
        let argon2 = Argon2PasswordChecker::new().unwrap();
        let hash = argon2.hash(&plain("secret1")).unwrap();
        assert!(hash.as_str().starts_with("$argon2id$"));

        let checker = pbkdf2_checker();

        assert!(checker.verify(&plain("secret1"), &hash).unwrap().is_match());
        assert!(checker.verify(&plain("wrong"), &hash).unwrap().is_mismatch());
    }

    #[rstest]
    fn test_pbkdf2で作成したハッシュをargon2設定でも検証できる() {
        let hash = pbkdf2_checker().hash(&plain("secret1")).unwrap();

        let checker = Argon2PasswordChecker::new().unwrap();

        assert!(checker.verify(&plain("secret1"), &hash).unwrap().is_match());
    }

    #[rstest]
    fn test_ダミー検証はパニックしない() {
        pbkdf2_checker().dummy_verify(&plain("anything"));
    }

    #[rstest]
    #[case("pbkdf2-sha256", PasswordAlgorithm::Pbkdf2Sha256)]
    #[case("argon2id", PasswordAlgorithm::Argon2id)]
    fn test_アルゴリズム名をパースできる(#[case] input: &str, #[case] expected: PasswordAlgorithm) {
        assert_eq!(input.parse::<PasswordAlgorithm>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    fn test_未知のアルゴリズム名はエラー() {
        assert!("bcrypt".parse::<PasswordAlgorithm>().is_err());
    }
}

use crate::common::error::PawgitError;

/// pawgitプロジェクト全体で使用するResult型のエイリアス
///
/// エラー型を [`PawgitError`] に固定することで、各レイヤーのシグネチャを
/// 簡潔に保つ。
///
/// # Examples
///
/// ```
/// use pawgit::common::result::PawgitResult;
/// use pawgit::common::error::PawgitError;
///
/// fn probe_console(console_id: u64) -> PawgitResult<()> {
///     if console_id == 0 {
///         return Err(PawgitError::console_unavailable("no such console", Some(console_id)));
///     }
///     Ok(())
/// }
///
/// assert!(probe_console(42).is_ok());
/// assert!(probe_console(0).is_err());
/// ```
pub type PawgitResult<T> = Result<T, PawgitError>;

/// PawgitResultの変換ヘルパー
pub trait PawgitResultExt<T> {
    /// 失敗をログに残しつつOptionへ落とす
    ///
    /// 失敗しても処理を続行してよい補助的な取得（CPUクォータなど）に使う。
    ///
    /// # Examples
    ///
    /// ```
    /// use pawgit::common::result::{PawgitResult, PawgitResultExt};
    /// use pawgit::common::error::PawgitError;
    ///
    /// let ok: PawgitResult<u64> = Ok(42);
    /// assert_eq!(ok.to_option_logged(), Some(42));
    ///
    /// let err: PawgitResult<u64> = Err(PawgitError::timeout(5));
    /// assert_eq!(err.to_option_logged(), None);
    /// ```
    fn to_option_logged(self) -> Option<T>;
}

impl<T> PawgitResultExt<T> for PawgitResult<T> {
    fn to_option_logged(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("PawgitResult error: {}", e);
                None
            }
        }
    }
}

/// 非同期実行のヘルパー
pub mod async_helpers {
    use super::{PawgitError, PawgitResult};
    use std::future::Future;

    /// 全体期限付きでFutureを実行する
    ///
    /// 期限切れは [`PawgitError::Timeout`] になる。これは一時的な失敗では
    /// ないので、リトライの対象にならない。
    pub async fn with_timeout<F, T>(f: F, timeout_secs: u64) -> PawgitResult<T>
    where
        F: Future<Output = PawgitResult<T>>,
    {
        let timeout_duration = std::time::Duration::from_secs(timeout_secs);

        match tokio::time::timeout(timeout_duration, f).await {
            Ok(result) => result,
            Err(_) => Err(PawgitError::timeout(timeout_secs)),
        }
    }
}

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// ファイルへのログ出力を初期化する
///
/// 画面は端末が占有しているため、ログは `dir/file_name` に書き込む。
/// debug build でのみ有効。返り値のガードが drop されるまで書き込みが続く
pub fn init(dir: &Path, file_name: &str) -> Option<WorkerGuard> {
    #[cfg(debug_assertions)]
    {
        use tracing_subscriber::EnvFilter;

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // 既にグローバルな subscriber がある場合は何もしない
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .ok()
            .map(|_| guard)
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = (dir, file_name); // unused variable warning を回避
        None
    }
}

use std::{env, io, path::Path};

use grass::{
    config::Config,
    editor::{Editor, Flow},
    error,
    key::read_key,
    logger,
    screen::Screen,
    terminal::{self, Terminal},
};

/// 端末を raw mode にしてメインループを回す
///
/// `Terminal` はこの関数内で drop されるため、どの経路で抜けても
/// 画面クリアと端末設定の復元が済んでから呼び出し元に戻る
fn run(filename: Option<String>, config: Config) -> error::Result<()> {
    let timeout = config.escape_timeout;
    let mut terminal = Terminal::new(timeout)?;
    let mut editor = Editor::new(config, terminal.rows().into(), terminal.cols().into());

    if let Some(filename) = filename {
        editor.open_file(filename)?;
    }

    // キー入力ループ
    loop {
        Screen::refresh(terminal.stdout(), &mut editor)?;

        let key = read_key(terminal.input(), timeout)?;
        if editor.process_key(key) == Flow::Terminated {
            break;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _log_guard = logger::init(Path::new("."), "grass.log");

    let filename = env::args().nth(1);
    tracing::info!(file = filename.as_deref(), "startup");

    if let Err(err) = run(filename, Config::default()) {
        // raw mode に入る前の失敗では Terminal の drop が走らないため、ここでもクリアする
        let _ = terminal::clear_screen(&mut io::stdout());

        let op = err.op();
        let err = anyhow::Error::from(err);
        tracing::error!(op, error = %format!("{:#}", err), "fatal");
        return Err(err);
    }

    Ok(())
}

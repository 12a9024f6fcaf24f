use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    Terminal,
};
use std::io::stdout;

use quill::config::default_user_dir;
use quill::{logging, App};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init(&default_user_dir()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // Get command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Open the document before touching the terminal so a decode failure prints normally
    let mut app = if args.len() > 1 {
        App::with_file(&args[1]).await.inspect_err(|e| {
            log::error!("Failed to open '{}': {:#}", args[1], e);
        })?
    } else {
        App::new().await
    };

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    log::info!("Editor started");
    let result = app.run(&mut terminal).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Application error: {:#}", e);
    }
    result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    Ok(())
}

mod repl {
    use calclex::{tokenize, Token};
    use calcrpn::to_rpn;

    pub fn show(input: &str) {
        match tokenize(input) {
            Err(e) => println!("Lex error: {}", e),
            Ok(tokens) => {
                let listing = tokens.iter().map(Token::to_string).collect::<Vec<_>>();
                println!("tokens: [{}]", listing.join(", "));
                match to_rpn(&tokens) {
                    Err(e) => println!("Parse error: {}", e),
                    Ok(rpn) => {
                        println!("rpn:    {}", rpn.postfix());
                        println!("infix:  {}", rpn);
                    }
                }
            }
        }
    }
}

fn history_path() -> Option<std::path::PathBuf> {
    match std::env::var_os("CALC_HISTORY") {
        Some(path) => Some(path.into()),
        None => dirs::home_dir().map(|h| h.join(".calc_history")),
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        repl::show(&input);
        return Ok(());
    }

    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    let histpath = history_path();
    if let Some(path) = &histpath {
        if rl.load_history(path).is_err() {
            log::info!("no history at {}", path.display());
        }
    }
    loop {
        match rl.readline(">> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                repl::show(&line);
            }
        }
    }
    if let Some(path) = &histpath {
        rl.save_history(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

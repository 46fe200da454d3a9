use hedrals::{FormatOptions, Limits};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        let formula = line.trim();
        if !formula.is_empty() {
            match hedrals::roll(formula, Limits::default()) {
                Ok(result) => {
                    println!("{}", hedrals::format(&result, &FormatOptions::default()))
                }
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

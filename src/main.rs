use minish::Interpreter;

fn main() {
    if let Err(e) = Interpreter::default().repl() {
        eprintln!("minish: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = league_graphs::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

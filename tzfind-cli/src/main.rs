//! Binary entrypoint for tzfind

fn main() {
    if let Err(err) = tzfind_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

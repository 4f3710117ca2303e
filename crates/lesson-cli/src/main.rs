fn main() {
    std::process::exit(lesson_cli::run_cli_from_args(std::env::args_os()));
}

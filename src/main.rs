use lisp_eval::{
    diagnostics::{emit_syntax_errors, report_io_error, report_runtime_error},
    read, ErrorPolicy, EvalOptions, Interpreter,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "Usage: lisp-eval [--lenient] [run <file.lisp> | eval <source>]";

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let mut options = EvalOptions::from_env();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if let Some(idx) = args.iter().position(|arg| arg == "--lenient") {
        args.remove(idx);
        options = options.with_policy(ErrorPolicy::Lenient);
    }

    let (name, source) = match args.as_slice() {
        [command, filename] if command == "run" => {
            if !filename.ends_with(".lisp") {
                eprintln!("Invalid file extension. Only .lisp files are allowed.");
                return ExitCode::FAILURE;
            }
            match fs::read_to_string(filename) {
                Ok(content) => (filename.clone(), content),
                Err(err) => {
                    report_io_error(Path::new(filename), &err);
                    return ExitCode::FAILURE;
                }
            }
        }
        [command, source] if command == "eval" => ("<eval>".to_string(), source.clone()),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let program = match read(&source) {
        Ok(program) => program,
        Err(errors) => {
            emit_syntax_errors(&name, &source, &errors);
            return ExitCode::FAILURE;
        }
    };

    let mut interpreter = Interpreter::with_options(options);
    match interpreter.interpret(&program) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_runtime_error(&err);
            ExitCode::FAILURE
        }
    }
}

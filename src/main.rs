use std::{env, fs, path::PathBuf, process::exit, rc::Rc, time::Instant};

use splc::{
    codegen::generator::Generator,
    display_error,
    errors::errors::Error,
    inliner::inliner::Inliner,
    lexer::lexer::tokenize,
    linearizer::linearizer::{linearize, Layout},
    parser::parser::parse,
    scope::resolver::resolve,
    type_checker::type_checker::check,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: splc <input.spl> [output.bas]");
        exit(1);
    }

    let input = PathBuf::from(&args[1]);
    let output = match args.get(2) {
        Some(path) => PathBuf::from(path),
        None => input.with_extension("bas"),
    };

    let file_name = match input.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => args[1].clone(),
    };

    let source = match fs::read_to_string(&input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", input.display(), error);
            exit(1);
        }
    };

    let file = Rc::new(file_name);
    let start = Instant::now();

    let tokens = unwrap_stage(tokenize(source.clone(), Rc::clone(&file)), &source);
    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program = unwrap_stage(parse(tokens, Rc::clone(&file)), &source);
    println!("Parsed in {:?}", parse_start.elapsed());

    let resolve_start = Instant::now();
    let symbols = unwrap_stage_all(resolve(&program, Rc::clone(&file)), &source);
    println!("Resolved scopes in {:?}", resolve_start.elapsed());

    let check_start = Instant::now();
    unwrap_stage_all(check(&program, &symbols, Rc::clone(&file)), &source);
    println!("Type checked in {:?}", check_start.elapsed());

    let codegen_start = Instant::now();
    let (stream, counters) = unwrap_stage(Generator::generate(&program), &source);
    let stream = unwrap_stage(
        Inliner::new(&program, counters, Rc::clone(&file)).inline(stream),
        &source,
    );
    let basic = unwrap_stage(linearize(&stream, Layout::default()), &source);
    println!("Generated code in {:?}", codegen_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    let listing = basic.to_source();
    if let Err(error) = fs::write(&output, format!("{}\n", listing)) {
        eprintln!("Failed to write {}: {}", output.display(), error);
        exit(1);
    }

    println!("Wrote {}:\n", output.display());
    println!("{}", listing);
}

fn unwrap_stage<T>(result: Result<T, Error>, source: &str) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            display_error(&error, source);
            exit(1);
        }
    }
}

fn unwrap_stage_all<T>(result: Result<T, Vec<Error>>, source: &str) -> T {
    match result {
        Ok(value) => value,
        Err(errors) => {
            for error in &errors {
                display_error(error, source);
            }
            exit(1);
        }
    }
}

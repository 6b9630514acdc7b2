//! End-to-end driver: tokenize, parse, optimize and interpret one source.

use std::{rc::Rc, time::Instant};

use tracing::info;

use crate::{
    ast::ast::Node,
    errors::errors::Error,
    interpreter::{environment::Environment, interpreter::Interpreter},
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
    symbols::symbols::SymbolTable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub optimize: bool,
    pub execute: bool,
    /// Print the final tree to stdout
    pub print_tree: bool,
    /// Print the symbol table to stdout
    pub print_symbols: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            optimize: true,
            execute: true,
            print_tree: false,
            print_symbols: false,
        }
    }
}

impl PipelineOptions {
    /// Options of the command-line driver, which prints the final tree.
    pub fn driver() -> Self {
        PipelineOptions {
            print_tree: true,
            ..PipelineOptions::default()
        }
    }
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub program: Node,
    pub symbols: SymbolTable,
    /// Present when the program was executed
    pub environment: Option<Environment>,
}

pub fn run_source(source: &str, file: &str, options: &PipelineOptions) -> Result<PipelineOutput, Error> {
    let start = Instant::now();

    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    info!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

    let parse_start = Instant::now();
    let (mut program, symbols) = parse(tokens, Rc::new(file.to_string()))?;
    info!("Parsed in {:?}", parse_start.elapsed());

    if options.optimize {
        let optimize_start = Instant::now();
        program = optimize(program, &symbols)?;
        info!("Optimized in {:?}", optimize_start.elapsed());
    }

    if options.print_symbols {
        println!("{}", symbols);
    }
    if options.print_tree {
        print!("{}", program.tree());
    }

    let environment = if options.execute {
        let execute_start = Instant::now();
        let mut interpreter = Interpreter::default();
        interpreter.run(&program)?;
        info!("Executed in {:?}", execute_start.elapsed());
        Some(interpreter.into_environment())
    } else {
        None
    };

    info!("Total time: {:?}", start.elapsed());

    Ok(PipelineOutput {
        program,
        symbols,
        environment,
    })
}

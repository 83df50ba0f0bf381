//! Per-function compilation pipeline.
//!
//! Each function unit compiles independently of every other: a failure in one
//! never blocks a sibling, and the fan-out across units is free of shared
//! mutable state.

use rayon::prelude::*;

use limbo_codegen::codegen::Codegen;
use limbo_mappings::Profile;
use limbo_parser::ast::Stmt;
use limbo_parser::lexer::tokenize;
use limbo_parser::parser::Parser;
use limbo_passes::const_prop::ConstProp;
use limbo_source::{CompileError, Source};

use crate::loader::{self, FunctionKind, RawFunction};

/// The output unit for one source function.
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    pub name: String,
    pub kind: FunctionKind,
    /// Generated (or passed-through) commands, in source order.
    pub commands: Vec<String>,
    /// `false` once generation halted on an unresolved call.
    pub complete: bool,
    /// Everything reported while compiling this unit.
    pub errors: Vec<CompileError>,
}

impl CompiledFunction {
    /// `true` if the unit compiled fully and cleanly.
    pub fn ok(&self) -> bool {
        self.complete && self.errors.is_empty()
    }

    fn failed(name: String, kind: FunctionKind, error: CompileError) -> Self {
        Self {
            name,
            kind,
            commands: Vec::new(),
            complete: false,
            errors: vec![error],
        }
    }
}

/// Tokenizes and parses one limbo function body into its statement list.
pub fn compile_ast(body: &str) -> Result<Vec<Stmt>, CompileError> {
    let source: Source = body.into();
    let tokens = tokenize(&source)?;
    Parser::new(&tokens).parse_program()
}

/// Compiles one extracted function unit against a mapping profile.
pub fn compile_function(func: &RawFunction, profile: &Profile) -> CompiledFunction {
    match func.kind {
        FunctionKind::Vanilla => CompiledFunction {
            name: func.name.clone(),
            kind: func.kind,
            // The body already consists of ready commands, one per line.
            commands: func
                .body
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            complete: true,
            errors: Vec::new(),
        },
        FunctionKind::Limbo => {
            let source: Source = func.body.as_str().into();

            let ast = match tokenize(&source).and_then(|tokens| {
                Parser::new(&tokens).parse_program()
            }) {
                Ok(ast) => ast,
                Err(error) => {
                    return CompiledFunction::failed(func.name.clone(), func.kind, error)
                }
            };

            let mut pass = ConstProp::new();
            pass.run(&ast);

            let mut codegen = Codegen::new(
                func.name.clone(),
                profile,
                pass.resolved_args(),
                &source,
            );
            codegen.gen_function(&ast);

            let complete = codegen.is_complete();
            CompiledFunction {
                name: func.name.clone(),
                kind: func.kind,
                commands: codegen.into_commands(),
                complete,
                errors: source.errors.to_vec(),
            }
        }
    }
}

/// Extracts and compiles every function unit in `code`. Units are
/// independent, so they compile in parallel; the output order matches the
/// extraction order.
pub fn compile_source(code: &str, profile: &Profile) -> Vec<CompiledFunction> {
    loader::extract_functions(code)
        .par_iter()
        .map(|func| compile_function(func, profile))
        .collect()
}

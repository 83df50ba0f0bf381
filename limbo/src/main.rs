use clap::Parser;
use console::style;
use std::fs;
use std::process;

use limbo::compile::{compile_ast, compile_source};
use limbo::loader::{extract_functions, FunctionKind};
use limbo_mappings::MappingTable;

mod cli;

fn main() {
    let args = cli::CommandLine::parse();

    let code = match fs::read_to_string(&args.input) {
        Ok(code) => code,
        Err(err) => {
            eprintln!(
                "{} cannot read {}: {}",
                style("error:").red().bold(),
                args.input.display(),
                err
            );
            process::exit(1);
        }
    };

    let table = match MappingTable::bundled() {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            process::exit(1);
        }
    };

    let profile = match table.profile(&args.target) {
        Some(profile) => profile,
        None => {
            eprintln!(
                "{} unknown mapping version `{}`, available: {}",
                style("error:").red().bold(),
                args.target,
                table.versions().join(", ")
            );
            process::exit(1);
        }
    };

    if args.dump_ast {
        for func in extract_functions(&code) {
            if func.kind == FunctionKind::Limbo {
                match compile_ast(&func.body) {
                    Ok(ast) => eprintln!("{}:\n{:#?}", func.name, ast),
                    Err(err) => eprintln!("{}: {}", func.name, err),
                }
            }
        }
    }

    let compiled = compile_source(&code, profile);
    if compiled.is_empty() {
        eprintln!(
            "{} no `fun`/`def` declarations found in {}",
            style("warning:").yellow().bold(),
            args.input.display()
        );
    }

    let mut failed = 0;
    for func in &compiled {
        if func.ok() {
            println!(
                "{} {} ({} commands)",
                style("ok").green(),
                func.name,
                func.commands.len()
            );
        } else {
            failed += 1;
            println!("{} {}", style("failed").red().bold(), func.name);
            for error in &func.errors {
                eprintln!("  {} {}", style("error:").red().bold(), error);
            }
        }
    }

    if let Some(out_dir) = &args.out {
        if let Err(err) = fs::create_dir_all(out_dir) {
            eprintln!(
                "{} cannot create {}: {}",
                style("error:").red().bold(),
                out_dir.display(),
                err
            );
            process::exit(1);
        }
        for func in &compiled {
            let path = out_dir.join(format!("{}.mcfunction", func.name));
            let mut contents = func.commands.join("\n");
            contents.push('\n');
            if let Err(err) = fs::write(&path, contents) {
                eprintln!(
                    "{} cannot write {}: {}",
                    style("error:").red().bold(),
                    path.display(),
                    err
                );
                process::exit(1);
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

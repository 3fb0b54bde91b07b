use accvm::{
    console::StdConsole,
    constant::{DEFAULT_MEMORY_SIZE, NAME},
    error::{LoadError, MachineError},
    inspect::ReportInspector,
    log::set_verbosity,
    machine::{Exit, Machine},
    source, verbose_println, very_verbose_println,
};
use clap::{ArgAction, Parser};
use colorize::AnsiColor;
use std::{path::PathBuf, process::exit};

/// Load an assembly listing into the accumulator machine and run it.
#[derive(Parser, Debug)]
#[command(name = NAME, version, about)]
struct Cli {
    /// assembly listing to run
    source: PathBuf,
    /// machine memory in words
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,
    /// print loader and machine progress (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// print the machine state once the run stops
    #[arg(short, long)]
    inspect_on_exit: bool,
}

fn handle_fatal_load_err(err: LoadError) -> ! {
    println!("{err}");
    exit(1)
}

fn handle_fatal_machine_err(err: MachineError) -> ! {
    println!("\n{err}");
    exit(1)
}

fn main() {
    let cli = Cli::parse();
    set_verbosity(cli.verbose as usize);
    verbose_println!("memory size [ {} ] words", cli.memory_size);

    let program = match source::load_file(&cli.source, cli.memory_size) {
        Ok(program) => program,
        Err(err) => handle_fatal_load_err(err),
    };
    verbose_println!(
        "loaded {} with [ {} ] labels",
        cli.source.display(),
        program.labels().len()
    );
    for (address, name) in program.labels().iter() {
        very_verbose_println!("label {name} -> [ {address} ]");
    }

    let mut machine = Machine::new(program);
    let mut console = StdConsole::new();
    let mut inspector = ReportInspector::stdout();
    let report = match machine.run(&mut console, &mut inspector) {
        Ok(report) => report,
        Err(err) => {
            if cli.inspect_on_exit {
                println!("\n{}", machine.snapshot().report());
            }
            handle_fatal_machine_err(err)
        }
    };
    if cli.inspect_on_exit {
        println!("\n{}", machine.snapshot().report());
    }
    if report.unknown_opcodes > 0 {
        verbose_println!("skipped [ {} ] unknown opcodes", report.unknown_opcodes);
    }
    match report.exit {
        Exit::Halted => verbose_println!("halted after [ {} ] steps", report.steps),
        Exit::PcOutOfRange { pc } => {
            println!(
                "\n{NAME}: {} PC [ {pc} ] out of bounds, memory is [ {} ] words",
                "stopped:".red(),
                machine.memory().len()
            );
            exit(2)
        }
    }
}

//! Metatrace CLI entry point.

use metatrace_runtime::Shell;
use std::env;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    program: Option<String>,
    full_mode: bool,
    no_cache: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--full" => config.full_mode = true,
            "--nocache" => config.no_cache = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}").into());
            }
            program => {
                if config.program.is_some() {
                    return Err("only one metaprogram may be given".into());
                }
                config.program = Some(program.to_string());
            }
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("metatrace {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut shell = Shell::new()?;

    // Evaluate a metaprogram up front when one was given, as if the user had
    // typed the evaluate command.
    if let Some(program) = &config.program {
        let mut line = String::from("evaluate");
        if config.full_mode {
            line.push_str(" -full");
        }
        if config.no_cache {
            line.push_str(" -nocache");
        }
        line.push(' ');
        line.push_str(program);

        for text in shell.execute(&line)? {
            println!("{text}");
        }
        shell = shell.without_banner();
    }

    shell.run()?;
    Ok(())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    "\x1b[1mMetatrace\x1b[0m - Interactive debugger for template-metaprogram evaluation

\x1b[1mUSAGE:\x1b[0m
    metatrace [OPTIONS] [PROGRAM]

\x1b[1mARGUMENTS:\x1b[0m
    [PROGRAM]    Metaprogram to evaluate before entering the shell
                 (fib<N>, fail<N>, int, spec)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    --full           Stop on every event, including deduced substitutions
    --nocache        Disable trace caching (backward stepping unavailable)

\x1b[1mEXAMPLES:\x1b[0m
    metatrace                    Start the shell with no metaprogram
    metatrace 'fib<10>'          Evaluate fib<10>, then debug interactively
    metatrace --full spec        Debug spec stopping on every raw event

\x1b[1mSHELL COMMANDS:\x1b[0m
    evaluate <program>        Start debugging a metaprogram
    step [over|out] [N]       Step N display events (negative N steps backward)
    next [N]                  Step over N display events
    continue                  Run to a breakpoint or the end
    rbreak <regex>            Break on matching type names
    break list|remove <id>    List or remove breakpoints
    backtrace                 Show the active call stack
    frame <N>                 Show one frame of the call stack
    forwardtrace [N]          Show the subtree under the cursor
    savetrace <file>          Save the trace for offline replay
    replay <file>             Debug a previously saved trace
    help [command]            Full command list
    quit (or Ctrl+D)          Exit

For more information, visit https://github.com/ndouglas/metatrace"
        .to_string()
}

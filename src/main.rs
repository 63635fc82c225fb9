use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process;

use clap::{App, Arg, ArgMatches};
use env_logger::Builder;
use log::info;

use cpu_schedule::input::{InputError, Prompter};
use cpu_schedule::models::{DispatchEvent, Process, Schedule};
use cpu_schedule::report::{final_results, render_timeline, ResultRow, SimulationReport};
use cpu_schedule::scheduler::{Policy, PolicyKind, Quantum, ScheduleKpi, Simulation};
use cpu_schedule::workload::WorkloadGenerator;

#[derive(Debug, Default)]
struct Options {
    policy: Option<PolicyKind>,
    quantum: Option<Quantum>,
    random: Option<u32>,
    seed: u64,
    json: bool,
    gantt: bool,
    stats: bool,
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let matches = App::new("cpu-schedule")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulates FCFS, SJF and Round Robin CPU scheduling")
        .arg(
            Arg::with_name("policy")
                .short("p")
                .long("policy")
                .takes_value(true)
                .validator(valid_policy)
                .help("Skip the menu: fcfs, sjf or rr"),
        )
        .arg(
            Arg::with_name("quantum")
                .short("q")
                .long("quantum")
                .takes_value(true)
                .validator(valid_quantum)
                .help("Round Robin time quantum (with --policy rr)"),
        )
        .arg(
            Arg::with_name("random")
                .long("random")
                .takes_value(true)
                .value_name("N")
                .validator(valid_count)
                .help("Generate N random processes instead of reading them"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .default_value("42")
                .validator(valid_seed)
                .help("Seed for --random"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print the final results as a JSON report"),
        )
        .arg(
            Arg::with_name("gantt")
                .long("gantt")
                .help("Print a text timeline after the results"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print averages, makespan and CPU utilization"),
        )
        .get_matches();

    let options = match parse_options(&matches) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run(&options, stdin.lock(), &mut stdout.lock()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn valid_policy(value: String) -> Result<(), String> {
    value.parse::<PolicyKind>().map(|_| ())
}

fn valid_quantum(value: String) -> Result<(), String> {
    let ticks: i64 = value
        .parse()
        .map_err(|_| format!("Invalid quantum: {value}"))?;
    Quantum::new(ticks).map(|_| ()).map_err(|e| e.message)
}

fn valid_count(value: String) -> Result<(), String> {
    value
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("Invalid process count: {value}"))
}

fn valid_seed(value: String) -> Result<(), String> {
    value
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("Invalid seed: {value}"))
}

fn parse_options(matches: &ArgMatches) -> Result<Options, Box<dyn Error>> {
    let policy = matches
        .value_of("policy")
        .map(str::parse::<PolicyKind>)
        .transpose()?;
    let quantum = matches
        .value_of("quantum")
        .map(|q| -> Result<Quantum, Box<dyn Error>> { Ok(Quantum::new(q.parse()?)?) })
        .transpose()?;
    let random = matches
        .value_of("random")
        .map(str::parse::<u32>)
        .transpose()?;
    let seed = matches.value_of("seed").unwrap_or("42").parse()?;

    Ok(Options {
        policy,
        quantum,
        random,
        seed,
        json: matches.is_present("json"),
        gantt: matches.is_present("gantt"),
        stats: matches.is_present("stats"),
    })
}

/// Collects the process set and the policy, prompting for whatever the
/// flags leave open. `None` means the menu choice was invalid.
fn read_session<R: BufRead, W: Write>(
    options: &Options,
    prompter: &mut Prompter<R, W>,
) -> Result<(Vec<Process>, Option<Policy>), InputError> {
    let processes = match options.random {
        Some(count) => {
            info!("generating {count} process(es) with seed {}", options.seed);
            WorkloadGenerator::new(options.seed).generate(count)
        }
        None => {
            let count = prompter.read_process_count()?;
            prompter.read_processes(count)?
        }
    };

    let kind = match options.policy {
        Some(kind) => Some(kind),
        None => PolicyKind::from_menu(prompter.read_choice()?),
    };
    let policy = match kind {
        Some(kind) if kind.needs_quantum() => {
            let quantum = match options.quantum {
                Some(quantum) => quantum,
                None => prompter.read_quantum()?,
            };
            kind.with_quantum(Some(quantum))
        }
        Some(kind) => kind.with_quantum(None),
        None => None,
    };
    Ok((processes, policy))
}

fn run<R: BufRead, W: Write>(
    options: &Options,
    reader: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let (processes, policy) = read_session(options, &mut Prompter::new(reader, &mut *out))?;
    let simulation = Simulation::new(processes).map_err(InputError::from)?;

    let schedule = match policy {
        Some(policy) => {
            let progress = policy.reports_progress() && !options.json;
            let mut write_error: Option<io::Error> = None;
            let schedule = simulation.run_with(&policy, |event| {
                if let DispatchEvent::Completed(c) = event {
                    if progress && write_error.is_none() {
                        let line = ResultRow::from_completion(c).to_line();
                        if let Err(err) = writeln!(out, "{line}") {
                            write_error = Some(err);
                        }
                    }
                }
            });
            if let Some(err) = write_error {
                return Err(err.into());
            }
            schedule
        }
        None => {
            writeln!(out, "Invalid choice!")?;
            Schedule::new()
        }
    };

    match (policy, options.json) {
        (Some(policy), true) => {
            let report = SimulationReport::new(policy, simulation.processes(), schedule.clone());
            writeln!(out, "{}", report.to_json()?)?;
        }
        _ => {
            writeln!(out, "\nFinal Results:")?;
            for row in final_results(simulation.processes(), &schedule) {
                writeln!(out, "{}", row.to_line())?;
            }
        }
    }

    if options.gantt && policy.is_some() {
        writeln!(out, "\nTimeline:\n{}", render_timeline(&schedule))?;
    }

    if options.stats && policy.is_some() {
        let kpi = ScheduleKpi::calculate(&schedule);
        writeln!(out, "\nAverage Waiting Time = {:.2}", kpi.avg_waiting_time)?;
        writeln!(out, "Average Turnaround Time = {:.2}", kpi.avg_turnaround_time)?;
        writeln!(out, "Makespan = {}", kpi.makespan)?;
        writeln!(out, "CPU Utilization = {:.1}%", kpi.cpu_utilization * 100.0)?;
        writeln!(out, "Throughput = {:.3} processes/tick", kpi.throughput)?;
        writeln!(out, "Context Switches = {}", kpi.context_switches)?;
    }

    Ok(())
}

use anyhow::{Context, Result, anyhow, bail};
use lecture_outline_config::Config;
use lecture_outline_engine::{
    FileStore, LectureSession, Outline, OutlineService, SessionTimer, Storage, SystemClock,
    format_time, trim_command, youtube_timestamps,
};
use std::{
    env, fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "\
Usage: lecture-outline [--data DIR] <command>

Commands:
  import FILE [--title TITLE]     Create an outline from a markdown list
  outlines                        List outlines
  show OUTLINE_ID                 Print an outline's checklist
  record OUTLINE_ID               Start recording a lecture
  resume                          Continue a paused lecture
  sessions                        List recorded sessions
  timestamps SESSION_ID           Print YouTube chapter timestamps
  trim SESSION_ID INPUT OUTPUT    Print an ffmpeg command that cuts out pauses
  config DATA_DIR                 Save DATA_DIR as the default data directory";

const RECORD_HELP: &str = "c N: cover item N | u N: uncover item N | p: pause/resume | l: list | s: stop | q: quit (keeps the lecture paused)";

#[derive(Debug, PartialEq)]
enum Command {
    Import {
        file: PathBuf,
        title: Option<String>,
    },
    Outlines,
    Show {
        outline_id: String,
    },
    Record {
        outline_id: String,
    },
    Resume,
    Sessions,
    Timestamps {
        session_id: String,
    },
    Trim {
        session_id: String,
        input: String,
        output: String,
    },
}

/// A parsed command line.
#[derive(Debug, PartialEq)]
enum Invocation {
    /// Write the config file; needs no data directory
    Configure { data_path: PathBuf },
    Run {
        data_path: Option<PathBuf>,
        command: Command,
    },
}

type Timer<'a> = SessionTimer<&'a FileStore, SystemClock>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (data_override, command) = match parse_args(&args)? {
        Invocation::Configure { data_path } => {
            let config_path = Config::config_path();
            save_data_path(&config_path, data_path)?;
            println!("Saved {}", config_path.display());
            return Ok(());
        }
        Invocation::Run { data_path, command } => (data_path, command),
    };

    let data_path = match data_override {
        Some(path) => path,
        None => Config::load()?.unwrap_or_default().data_path,
    };
    log::info!("Using data path: {}", data_path.display());
    let store = FileStore::new(&data_path);

    match command {
        Command::Import { file, title } => import(&store, &file, title.as_deref()),
        Command::Outlines => {
            for outline in Storage::new(&store).outlines() {
                println!(
                    "{}  {}  ({} items)",
                    outline.id,
                    outline.title,
                    outline.items.len()
                );
            }
            Ok(())
        }
        Command::Show { outline_id } => {
            let outline = find_outline(&Storage::new(&store), &outline_id)?;
            print_checklist(&outline, &[]);
            Ok(())
        }
        Command::Record { outline_id } => {
            let outline = find_outline(&Storage::new(&store), &outline_id)?;
            let mut timer = SessionTimer::new(&store, SystemClock);
            if timer.has_paused_lecture() {
                println!("Discarding the paused lecture; use `resume` to continue it instead.");
            }
            timer.start_lecture(&outline);
            record(&mut timer, &outline)
        }
        Command::Resume => {
            let mut timer = SessionTimer::new(&store, SystemClock);
            if !timer.restore_paused_lecture() {
                bail!("No paused lecture to resume");
            }
            let outline_id = timer
                .current_session()
                .map(|session| session.outline_id.clone())
                .unwrap_or_default();
            let outline = find_outline(timer.storage(), &outline_id)?;
            println!(
                "Resuming at {} (paused). Press p to continue recording.",
                format_time(timer.elapsed_time(), false)
            );
            record(&mut timer, &outline)
        }
        Command::Sessions => {
            let storage = Storage::new(&store);
            let outlines = storage.outlines();
            for session in storage.sessions() {
                let title = outlines
                    .iter()
                    .find(|outline| outline.id == session.outline_id)
                    .map_or(session.outline_id.as_str(), |outline| outline.title.as_str());
                println!("{}", session_summary(&session, title));
            }
            Ok(())
        }
        Command::Timestamps { session_id } => {
            let storage = Storage::new(&store);
            let session = find_session(&storage, &session_id)?;
            let outline = find_outline(&storage, &session.outline_id)?;
            println!("{}", youtube_timestamps(&outline, &session));
            Ok(())
        }
        Command::Trim {
            session_id,
            input,
            output,
        } => {
            let session = find_session(&Storage::new(&store), &session_id)?;
            let command = trim_command(&session, &input, &output)
                .ok_or_else(|| anyhow!("Session {session_id} has no recorded time"))?;
            println!("{command}");
            Ok(())
        }
    }
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut data_path = None;
    let mut title = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => {
                let value = iter.next().context("--data needs a directory")?;
                data_path = Some(PathBuf::from(value));
            }
            "--title" => {
                let value = iter.next().context("--title needs a value")?;
                title = Some(value.clone());
            }
            "-h" | "--help" => bail!("{USAGE}"),
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        ["import", file] => Command::Import {
            file: PathBuf::from(file),
            title,
        },
        ["outlines"] => Command::Outlines,
        ["show", id] => Command::Show {
            outline_id: id.to_string(),
        },
        ["record", id] => Command::Record {
            outline_id: id.to_string(),
        },
        ["resume"] => Command::Resume,
        ["sessions"] => Command::Sessions,
        ["timestamps", id] => Command::Timestamps {
            session_id: id.to_string(),
        },
        ["trim", id, input, output] => Command::Trim {
            session_id: id.to_string(),
            input: input.to_string(),
            output: output.to_string(),
        },
        ["config", dir] => {
            return Ok(Invocation::Configure {
                data_path: PathBuf::from(dir),
            });
        }
        _ => bail!("{USAGE}"),
    };

    Ok(Invocation::Run { data_path, command })
}

fn save_data_path(config_path: &Path, data_path: PathBuf) -> Result<()> {
    Config { data_path }
        .save_to_path(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

fn import(store: &FileStore, file: &Path, title: Option<&str>) -> Result<()> {
    let markdown =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    match OutlineService::new(store).import_markdown(&markdown, title) {
        Ok(outline) => {
            println!(
                "Imported outline {}: {} ({} items)",
                outline.id,
                outline.title,
                outline.items.len()
            );
            Ok(())
        }
        Err(e) => {
            for message in e.messages() {
                eprintln!("{message}");
            }
            Err(e.into())
        }
    }
}

fn find_outline(storage: &Storage<&FileStore>, id: &str) -> Result<Outline> {
    storage
        .outline(id)
        .ok_or_else(|| anyhow!("No outline with id {id}"))
}

fn find_session(storage: &Storage<&FileStore>, id: &str) -> Result<LectureSession> {
    storage
        .session(id)
        .ok_or_else(|| anyhow!("No session with id {id}"))
}

fn print_checklist(outline: &Outline, checked: &[String]) {
    println!("{}", outline.title);
    for (index, item) in outline.items.iter().enumerate() {
        let mark = if checked.contains(&item.id) { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", index + 1, item.display_title());
    }
}

fn session_summary(session: &LectureSession, outline_title: &str) -> String {
    let started = chrono::DateTime::from_timestamp_millis(session.started_at)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| session.started_at.to_string());
    let active = session
        .active_duration()
        .map_or_else(|| "unfinished".to_string(), |ms| format_time(ms, false));

    format!(
        "{}  {}  started {}  active {}  covered {}",
        session.id,
        outline_title,
        started,
        active,
        session.item_timestamps.len()
    )
}

/// Resolve a 1-based item number typed by the user.
fn item_id_at<'a>(outline: &'a Outline, number: &str) -> Option<&'a str> {
    let index = number.parse::<usize>().ok()?.checked_sub(1)?;
    outline.items.get(index).map(|item| item.id.as_str())
}

fn record(timer: &mut Timer<'_>, outline: &Outline) -> Result<()> {
    print_checklist(outline, timer.checked_item_ids());
    println!("{RECORD_HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match (parts.next(), parts.next()) {
            (Some(action @ ("c" | "u")), Some(number)) => match item_id_at(outline, number) {
                Some(item_id) if action == "c" => timer.log_item_covered(item_id),
                Some(item_id) => timer.remove_item_timestamp(item_id),
                None => println!("No item {number}"),
            },
            (Some("p"), None) => {
                if timer.is_running() {
                    timer.pause_lecture();
                    println!("Paused");
                } else {
                    timer.resume_lecture();
                    println!("Recording");
                }
            }
            (Some("l"), None) => print_checklist(outline, timer.checked_item_ids()),
            (Some("s"), None) => {
                if let Some(session) = timer.stop_lecture() {
                    println!("{}", session_summary(&session, &outline.title));
                }
                return Ok(());
            }
            (Some("q"), None) => break,
            _ => println!("{RECORD_HELP}"),
        }

        print!("[{}] ", format_time(timer.elapsed_time(), false));
        io::stdout().flush()?;
    }

    timer.pause_lecture();
    println!("Lecture paused; run `lecture-outline resume` to continue.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecture_outline_engine::{ItemTimestamp, OutlineItem, PausedInterval};
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_import_with_title_and_data() {
        let argv = args(&["--data", "/tmp/d", "import", "talk.md", "--title", "Talk"]);

        let invocation = parse_args(&argv).unwrap();

        assert_eq!(
            invocation,
            Invocation::Run {
                data_path: Some(PathBuf::from("/tmp/d")),
                command: Command::Import {
                    file: PathBuf::from("talk.md"),
                    title: Some("Talk".to_string()),
                },
            }
        );
    }

    #[test]
    fn test_parse_trim() {
        let invocation = parse_args(&args(&["trim", "s1", "in.mp4", "out.mp4"])).unwrap();

        assert_eq!(
            invocation,
            Invocation::Run {
                data_path: None,
                command: Command::Trim {
                    session_id: "s1".to_string(),
                    input: "in.mp4".to_string(),
                    output: "out.mp4".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_config_command_saves_data_path() {
        let invocation = parse_args(&args(&["config", "~/lectures"])).unwrap();
        assert_eq!(
            invocation,
            Invocation::Configure {
                data_path: PathBuf::from("~/lectures"),
            }
        );

        let config_dir = tempfile::tempdir().unwrap();
        let config_path = config_dir.path().join("nested").join("config.toml");
        save_data_path(&config_path, PathBuf::from("/srv/lectures")).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded.data_path, PathBuf::from("/srv/lectures"));
    }

    #[test]
    fn test_parse_rejects_unknown_and_incomplete() {
        assert!(parse_args(&args(&["record"])).is_err());
        assert!(parse_args(&args(&["config"])).is_err());
        assert!(parse_args(&args(&["dance"])).is_err());
        assert!(parse_args(&args(&["outlines", "--data"])).is_err());
        assert!(parse_args(&[]).is_err());
    }

    #[test]
    fn test_item_id_at_is_one_based() {
        let outline = Outline::new(
            "T",
            vec![OutlineItem::new("a", "A", 0), OutlineItem::new("b", "B", 0)],
        );

        assert_eq!(item_id_at(&outline, "1"), Some("a"));
        assert_eq!(item_id_at(&outline, "2"), Some("b"));
        assert_eq!(item_id_at(&outline, "0"), None);
        assert_eq!(item_id_at(&outline, "3"), None);
        assert_eq!(item_id_at(&outline, "x"), None);
    }

    #[test]
    fn test_session_summary() {
        let mut session = LectureSession::new("o", 0);
        session.id = "s1".to_string();
        session.paused_intervals = vec![PausedInterval {
            start: 60_000,
            end: 90_000,
        }];
        session.item_timestamps = vec![ItemTimestamp {
            item_id: "a".to_string(),
            timestamp: 1_000,
        }];
        session.completed_at = Some(150_000);

        assert_eq!(
            session_summary(&session, "Talk"),
            "s1  Talk  started 1970-01-01 00:00  active 02:00  covered 1"
        );
    }
}

//! Command dispatch: parse raw arguments, call the use cases, print results

use crate::application::materials::apply_analysis;
use crate::application::{
    auth, init, stats, BackupService, BookmarkInput, BookmarkService, ConfigService,
    MaterialService, MindMapService, NoteService, PlannerService, PomodoroService,
    ProjectService, SnippetService, SyncService,
};
use crate::cli::commands::*;
use crate::cli::output;
use crate::domain::converters::{self, Radix};
use crate::domain::pomodoro::format_time;
use crate::domain::quotes::random_quote;
use crate::domain::tags::parse_tag_list;
use crate::domain::{
    BlockType, BookmarkPatch, Category, ImportPayload, MaterialDraft, MaterialType, Mood,
    NotePatch, PomodoroTimer, ProjectPatch, ProjectPriority, ProjectStatus, SnippetDraft,
    SnippetLanguage, SnippetPatch, TimerMode,
};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::gist::PushOutcome;
use crate::infrastructure::{EditorSession, FileSystemRepository};
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Parse a raw argument with the type's `FromStr`, reporting failures as
/// invalid input.
fn parse_arg<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(EmbedLinkError::InvalidInput)
}

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    value.map(parse_arg).transpose()
}

fn tags(value: Option<&str>) -> Option<Vec<String>> {
    value.map(parse_tag_list)
}

/// `YYYY-MM-DD`, `today`, `yesterday` or `tomorrow`
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - ChronoDuration::days(1)),
        "tomorrow" => Ok(today + ChronoDuration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            EmbedLinkError::InvalidInput(format!(
                "Invalid date: '{}'. Expected YYYY-MM-DD, today, yesterday or tomorrow",
                input
            ))
        }),
    }
}

fn day(arg: &DateArg) -> Result<NaiveDate> {
    parse_date(&arg.date, Local::now().date_naive())
}

/// Ask on stdin; anything but y/yes declines.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn apply_import(repo: FileSystemRepository, payload: ImportPayload, yes: bool) -> Result<()> {
    let names = payload.replaced();
    if names.is_empty() {
        println!("Nothing to import");
        return Ok(());
    }
    if !yes && !confirm(&format!("This will overwrite: {}. Continue?", names.join(", ")))? {
        println!("Import cancelled");
        return Ok(());
    }
    let replaced = BackupService::new(repo).apply(payload)?;
    println!("Imported: {}", replaced.join(", "));
    Ok(())
}

pub fn run(command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        println!("embedlink - Knowledge base for embedded developers");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path, empty } => init::init(&path, empty),
        Commands::Config { key, value, list } => config(key, value, list),
        Commands::Login { email, username } => {
            let repo = FileSystemRepository::discover()?;
            let user = auth::login(&repo, &email, username.as_deref())?;
            println!("Signed in as {} <{}>", user.username, user.email);
            Ok(())
        }
        Commands::Logout => {
            let repo = FileSystemRepository::discover()?;
            if auth::logout(&repo)? {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
        Commands::Whoami => {
            let repo = FileSystemRepository::discover()?;
            match auth::whoami(&repo)? {
                Some(user) => println!(
                    "{} <{}>\nJoined {}",
                    user.username,
                    user.email,
                    output::format_timestamp(user.join_date)
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Commands::Bookmark(cmd) => bookmark(cmd),
        Commands::Note(cmd) => note(cmd),
        Commands::Mindmap { tag } => {
            let service = MindMapService::new(FileSystemRepository::discover()?);
            let view = service.view(tag.as_deref())?;
            print!("{}", output::format_mindmap(&view));
            Ok(())
        }
        Commands::Project(cmd) => project(cmd),
        Commands::Snippet(cmd) => snippet(cmd),
        Commands::Material(cmd) => material(cmd),
        Commands::Plan(cmd) => plan(cmd),
        Commands::Pomodoro(cmd) => pomodoro(cmd),
        Commands::Convert(cmd) => convert(cmd),
        Commands::Calc(cmd) => calc(cmd),
        Commands::Quote => {
            let quote = random_quote();
            println!("\"{}\"\n  - {}", quote.content, quote.author);
            Ok(())
        }
        Commands::Stats => {
            let repo = FileSystemRepository::discover()?;
            print!("{}", output::format_stats(&stats::collect(&repo)?));
            Ok(())
        }
        Commands::Export { output: target } => {
            let service = BackupService::new(FileSystemRepository::discover()?);
            let path = service.export(target.as_deref())?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Commands::Import { file, yes } => {
            let repo = FileSystemRepository::discover()?;
            let payload = BackupService::new(repo.clone()).read_import(&file)?;
            apply_import(repo, payload, yes)
        }
        Commands::Sync(cmd) => sync(cmd),
    }
}

fn config(key: Option<String>, value: Option<String>, list: bool) -> Result<()> {
    let service = ConfigService::new(FileSystemRepository::discover()?);

    if list {
        print!("{}", output::format_config(&service.list()?));
        return Ok(());
    }
    let Some(key) = key else {
        println!("Usage: embedlink config [--list | <key> [<value>]]");
        println!("Valid keys: theme, github_token, gemini_model, gist_api_url, log_level, created");
        return Ok(());
    };

    match value {
        Some(v) => {
            service.set(&key, &v)?;
            if key == "github_token" {
                println!("Set {}", key);
            } else {
                println!("Set {} = {}", key, v);
            }
        }
        None => println!("{}", service.get(&key)?),
    }
    Ok(())
}

fn bookmark(cmd: BookmarkCommand) -> Result<()> {
    if let BookmarkCommand::Categories = cmd {
        for c in Category::ALL {
            println!("{:<9} {}", c.key().to_lowercase(), c.label());
        }
        return Ok(());
    }

    let service = BookmarkService::new(FileSystemRepository::discover()?);
    match cmd {
        BookmarkCommand::Add {
            url,
            title,
            description,
            category,
            tags: tag_list,
            ai,
        } => {
            let input = BookmarkInput {
                url,
                title,
                description,
                category: parse_opt(category.as_deref())?,
                tags: tags(tag_list.as_deref()),
            };
            let draft = if ai {
                let analysis = service.suggest(&input.url)?;
                input.fill_from(analysis)
            } else {
                input.into_draft()
            };
            let b = service.add(draft)?;
            println!("Added bookmark {}: {}", b.id, b.title);
        }
        BookmarkCommand::List { category, query } => {
            let items = service.list(parse_opt(category.as_deref())?, &query)?;
            print!("{}", output::format_bookmark_list(&items));
        }
        BookmarkCommand::Edit {
            id,
            title,
            url,
            description,
            category,
            tags: tag_list,
        } => {
            let patch = BookmarkPatch {
                title,
                url,
                description,
                category: parse_opt(category.as_deref())?,
                tags: tags(tag_list.as_deref()),
            };
            let b = service.edit(&id, patch)?;
            println!("Updated bookmark {}: {}", b.id, b.title);
        }
        BookmarkCommand::Delete { id } => {
            let b = service.delete(&id)?;
            println!("Deleted bookmark {}: {}", b.id, b.title);
        }
        BookmarkCommand::Categories => {}
    }
    Ok(())
}

fn note(cmd: NoteCommand) -> Result<()> {
    let service = NoteService::new(FileSystemRepository::discover()?);
    match cmd {
        NoteCommand::Add {
            title,
            content,
            tags: tag_list,
        } => {
            let content = match content {
                Some(c) => c,
                None => service.compose(&EditorSession::from_env(), &format!("# {}\n\n", title))?,
            };
            let n = service.add(&title, content, tags(tag_list.as_deref()).unwrap_or_default())?;
            println!("Added note {}: {}", n.id, n.title);
        }
        NoteCommand::List { query } => {
            print!("{}", output::format_note_list(&service.list(&query)?));
        }
        NoteCommand::Show { id } => {
            print!("{}", output::format_note(&service.show(&id)?));
        }
        NoteCommand::Edit {
            id,
            title,
            content,
            tags: tag_list,
            editor,
        } => {
            let content = if editor {
                let current = service.show(&id)?;
                Some(service.compose(&EditorSession::from_env(), &current.content)?)
            } else {
                content
            };
            let patch = NotePatch {
                title,
                content,
                tags: tags(tag_list.as_deref()),
            };
            let n = service.edit(&id, patch)?;
            println!("Updated note {}: {}", n.id, n.title);
        }
        NoteCommand::Delete { id } => {
            let n = service.delete(&id)?;
            println!("Deleted note {}: {}", n.id, n.title);
        }
    }
    Ok(())
}

fn project(cmd: ProjectCommand) -> Result<()> {
    let service = ProjectService::new(FileSystemRepository::discover()?);
    match cmd {
        ProjectCommand::Add {
            name,
            description,
            github,
            tags: tag_list,
        } => {
            let p = service.add(
                &name,
                description,
                github,
                tags(tag_list.as_deref()).unwrap_or_default(),
            )?;
            println!("Added project {}: {}", p.id, p.name);
        }
        ProjectCommand::List { status } => {
            let status: Option<ProjectStatus> = parse_opt(status.as_deref())?;
            print!("{}", output::format_project_list(&service.list(status)?));
        }
        ProjectCommand::Show { id } => print!("{}", output::format_project(&service.show(&id)?)),
        ProjectCommand::Edit {
            id,
            name,
            description,
            github,
            tags: tag_list,
        } => {
            let patch = ProjectPatch {
                name,
                description,
                github_url: github,
                tags: tags(tag_list.as_deref()),
            };
            let p = service.edit(&id, patch)?;
            println!("Updated project {}: {}", p.id, p.name);
        }
        ProjectCommand::Status { id, status } => {
            let p = service.set_status(&id, parse_arg(&status)?)?;
            println!("{} is now {}", p.name, p.status);
        }
        ProjectCommand::Priority { id, priority } => {
            let priority: ProjectPriority = parse_arg(&priority)?;
            let p = service.set_priority(&id, priority)?;
            println!("{} priority is now {}", p.name, p.priority);
        }
        ProjectCommand::Delete { id } => {
            let p = service.delete(&id)?;
            println!("Deleted project {}: {}", p.id, p.name);
        }
        ProjectCommand::Task(task) => match task {
            TaskCommand::Add { project, text } => {
                let t = service.add_task(&project, &text)?;
                println!("Added task {}: {}", t.id, t.content);
            }
            TaskCommand::Toggle { project, task } => {
                let p = service.toggle_task(&project, &task)?;
                println!("{} progress: {}%", p.name, p.progress);
            }
            TaskCommand::Delete { project, task } => {
                let p = service.delete_task(&project, &task)?;
                println!("{} progress: {}%", p.name, p.progress);
            }
        },
        ProjectCommand::Dashboard => {
            print!("{}", output::format_dashboard(&service.dashboard()?));
        }
        ProjectCommand::CommitMsg { id } => println!("{}", service.commit_message(&id)?),
    }
    Ok(())
}

fn read_code(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        EmbedLinkError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
    })
}

fn snippet(cmd: SnippetCommand) -> Result<()> {
    let service = SnippetService::new(FileSystemRepository::discover()?);
    match cmd {
        SnippetCommand::Add {
            title,
            code,
            file,
            language,
            description,
            platform,
            tags: tag_list,
        } => {
            let code = match (code, file) {
                (Some(c), _) => c,
                (None, Some(path)) => read_code(&path)?,
                (None, None) => String::new(),
            };
            let draft = SnippetDraft {
                title,
                code,
                language: parse_arg::<SnippetLanguage>(&language)?,
                description,
                tags: tags(tag_list.as_deref()).unwrap_or_default(),
                platform,
            };
            let s = service.add(draft)?;
            println!("Added snippet {}: {}", s.id, s.title);
        }
        SnippetCommand::List { query } => {
            print!("{}", output::format_snippet_list(&service.list(&query)?));
        }
        SnippetCommand::Show { id } => print!("{}", output::format_snippet(&service.show(&id)?)),
        SnippetCommand::Edit {
            id,
            title,
            code,
            file,
            language,
            description,
            platform,
            tags: tag_list,
        } => {
            let code = match (code, file) {
                (Some(c), _) => Some(c),
                (None, Some(path)) => Some(read_code(&path)?),
                (None, None) => None,
            };
            let patch = SnippetPatch {
                title,
                code,
                language: parse_opt(language.as_deref())?,
                description,
                tags: tags(tag_list.as_deref()),
                platform,
            };
            let s = service.edit(&id, patch)?;
            println!("Updated snippet {}: {}", s.id, s.title);
        }
        SnippetCommand::Delete { id } => {
            let s = service.delete(&id)?;
            println!("Deleted snippet {}: {}", s.id, s.title);
        }
    }
    Ok(())
}

fn material(cmd: MaterialCommand) -> Result<()> {
    let service = MaterialService::new(FileSystemRepository::discover()?);
    match cmd {
        MaterialCommand::Add {
            name,
            description,
            kind,
            tags: tag_list,
            link,
            ai,
            context,
        } => {
            let mut draft = MaterialDraft {
                name,
                description,
                kind: parse_arg::<MaterialType>(&kind)?,
                tags: tags(tag_list.as_deref()).unwrap_or_default(),
                link,
            };
            if ai {
                match service.analyze(&draft.name, &context)? {
                    Some(analysis) => apply_analysis(&mut draft, analysis),
                    None => eprintln!("AI analysis unavailable, saving as entered"),
                }
            }
            let m = service.add(draft)?;
            println!("Added material {}: {}", m.id, m.name);
        }
        MaterialCommand::List { kind, query } => {
            let kind: Option<MaterialType> = parse_opt(kind.as_deref())?;
            print!("{}", output::format_material_list(&service.list(kind, &query)?));
        }
        MaterialCommand::Delete { id } => {
            let m = service.delete(&id)?;
            println!("Deleted material {}: {}", m.id, m.name);
        }
    }
    Ok(())
}

fn plan(cmd: PlanCommand) -> Result<()> {
    let service = PlannerService::new(FileSystemRepository::discover()?);
    match cmd {
        PlanCommand::Show { date } => print!("{}", output::format_plan(&service.show(day(&date)?)?)),
        PlanCommand::List => {
            let dates = service.dates()?;
            if dates.is_empty() {
                println!("No plans found");
            }
            for d in dates {
                println!("{}", d.format("%Y-%m-%d %a"));
            }
        }
        PlanCommand::Todo(todo) => match todo {
            TodoCommand::Add { text, date } => {
                let t = service.add_todo(day(&date)?, &text)?;
                println!("Added todo {}: {}", t.id, t.text);
            }
            TodoCommand::Toggle { id, date } => {
                print!("{}", output::format_plan(&service.toggle_todo(day(&date)?, &id)?));
            }
            TodoCommand::Delete { id, date } => {
                service.delete_todo(day(&date)?, &id)?;
                println!("Deleted todo {}", id);
            }
        },
        PlanCommand::Block(block) => match block {
            BlockCommand::Add {
                title,
                start,
                end,
                kind,
                date,
            } => {
                let kind: BlockType = parse_arg(&kind)?;
                let b = service.add_block(day(&date)?, &title, &start, &end, kind)?;
                println!("Added block {}: {}-{} {}", b.id, b.start_time, b.end_time, b.title);
            }
            BlockCommand::Delete { id, date } => {
                service.delete_block(day(&date)?, &id)?;
                println!("Deleted block {}", id);
            }
        },
        PlanCommand::Summary { text, ai, date } => {
            let date = day(&date)?;
            let plan = if ai {
                service.generate_summary(date)?
            } else {
                service.set_summary(date, text.as_deref().unwrap_or_default())?
            };
            println!("{}", plan.summary);
        }
        PlanCommand::Mood { mood, date } => {
            let mood: Mood = parse_arg(&mood)?;
            let plan = service.set_mood(day(&date)?, mood)?;
            println!("Mood for {} set to {}", plan.date, plan.mood);
        }
    }
    Ok(())
}

fn pomodoro(cmd: PomodoroCommand) -> Result<()> {
    let service = PomodoroService::new(FileSystemRepository::discover()?);
    match cmd {
        PomodoroCommand::Start {
            task,
            rest,
            seconds,
        } => {
            let mode = if rest { TimerMode::Break } else { TimerMode::Work };
            let mut timer = PomodoroTimer::new(mode, &task);
            if let Some(s) = seconds {
                timer = timer.with_seconds(s.max(1));
            }

            println!("{} timer: {}", mode, format_time(timer.remaining()));
            let finished = service.run(timer, Duration::from_secs(1), |t| {
                print!("\r{} ", format_time(t.remaining()));
                let _ = io::stdout().flush();
            })?;
            println!();
            match finished {
                Some(session) => println!("Session complete: {}", session.task_name),
                None => println!("Break over"),
            }
        }
        PomodoroCommand::History => {
            print!("{}", output::format_pomodoro_history(&service.history()?));
        }
        PomodoroCommand::Clear => println!("Cleared {} session(s)", service.clear()?),
    }
    Ok(())
}

fn convert(cmd: ConvertCommand) -> Result<()> {
    match cmd {
        ConvertCommand::Base { value, from } => {
            let radix: Radix = parse_arg(&from)?;
            let r = converters::convert_base(&value, radix)?;
            println!("DEC {}\nHEX 0x{}\nBIN 0b{}", r.dec, r.hex, r.bin);
        }
        ConvertCommand::TextToHex { text } => println!("{}", converters::text_to_hex(&text)),
        ConvertCommand::HexToText { hex } => println!("{}", converters::hex_to_text(&hex)?),
    }
    Ok(())
}

fn calc(cmd: CalcCommand) -> Result<()> {
    match cmd {
        CalcCommand::Baud { pclk, baud } => {
            println!("{}", converters::calculate_baud(pclk, baud)?);
        }
        CalcCommand::Timer { clock, psc, arr } => {
            let r = converters::calculate_timer(clock, psc, arr)?;
            println!("Frequency = {}\nPeriod = {}", r.frequency_display(), r.period_display());
        }
    }
    Ok(())
}

fn sync(cmd: SyncCommand) -> Result<()> {
    let repo = FileSystemRepository::discover()?;
    let service = SyncService::new(repo.clone());
    match cmd {
        SyncCommand::Push => match service.push()? {
            PushOutcome::Created(id) => println!("Created backup gist {}", id),
            PushOutcome::Updated(id) => println!("Updated backup gist {}", id),
        },
        SyncCommand::Pull { yes } => {
            let payload = service.pull()?;
            apply_import(repo, payload, yes)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_relative_dates() {
        let today = d(2025, 3, 1);
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("Yesterday", today).unwrap(), d(2025, 2, 28));
        assert_eq!(parse_date("tomorrow", today).unwrap(), d(2025, 3, 2));
    }

    #[test]
    fn test_parse_absolute_date() {
        assert_eq!(parse_date("2024-12-31", d(2025, 1, 1)).unwrap(), d(2024, 12, 31));
    }

    #[test]
    fn test_parse_bad_date_is_invalid_input() {
        let err = parse_date("31/12/2024", d(2025, 1, 1)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_parse_arg_maps_to_invalid_input() {
        let err = parse_arg::<ProjectStatus>("shipping").unwrap_err();
        assert!(matches!(err, EmbedLinkError::InvalidInput(_)));
        assert_eq!(parse_opt::<Radix>(Some("hex")).unwrap(), Some(Radix::Hex));
        assert_eq!(parse_opt::<Radix>(None).unwrap(), None);
    }
}

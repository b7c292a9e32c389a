//! Output formatting utilities

use crate::application::{MindMapView, WorkspaceStats};
use crate::domain::{
    Bookmark, CodeSnippet, DailyPlan, Material, Note, PomodoroSession, Project, ProjectDashboard,
};
use crate::infrastructure::Config;
use chrono::{DateTime, Local};

const PREVIEW_CHARS: usize = 80;

/// Millisecond epoch timestamp as a local `YYYY-MM-DD HH:MM`
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn format_bookmark_list(bookmarks: &[Bookmark]) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks found".to_string();
    }

    let mut output = String::new();
    for b in bookmarks {
        output.push_str(&format!("{}  [{}] {}\n", b.id, b.category, b.title));
        output.push_str(&format!("    {}\n", b.url));
        if !b.description.is_empty() {
            output.push_str(&format!("    {}\n", b.description));
        }
        if !b.tags.is_empty() {
            output.push_str(&format!("    {}\n", format_tag_list(&b.tags)));
        }
    }
    output
}

/// Notes with a plain-text preview of their Markdown body
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        output.push_str(&format!(
            "{}  {}  {}\n",
            note.id,
            format_timestamp(note.updated_at),
            note.title
        ));
        let preview = note.preview(PREVIEW_CHARS);
        if !preview.is_empty() {
            output.push_str(&format!("    {}\n", preview));
        }
        if !note.tags.is_empty() {
            output.push_str(&format!("    {}\n", format_tag_list(&note.tags)));
        }
    }
    output
}

pub fn format_note(note: &Note) -> String {
    let mut output = format!("# {}\n", note.title);
    if !note.tags.is_empty() {
        output.push_str(&format!("{}\n", format_tag_list(&note.tags)));
    }
    output.push_str(&format!("Updated {}\n\n", format_timestamp(note.updated_at)));
    output.push_str(&note.content);
    if !note.content.ends_with('\n') {
        output.push('\n');
    }
    output
}

pub fn format_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }

    let mut output = String::new();
    for p in projects {
        output.push_str(&format!(
            "{}  {:<12} {:<7} {:>3}%  {}\n",
            p.id, p.status, p.priority, p.progress, p.name
        ));
    }
    output
}

pub fn format_project(project: &Project) -> String {
    let mut output = format!("{} ({})\n", project.name, project.id);
    output.push_str(&format!(
        "Status: {}  Priority: {}  Progress: {}%\n",
        project.status, project.priority, project.progress
    ));
    output.push_str(&format!("Started: {}\n", format_timestamp(project.start_date)));
    if let Some(url) = &project.github_url {
        output.push_str(&format!("Repository: {}\n", url));
    }
    if !project.tags.is_empty() {
        output.push_str(&format!("{}\n", format_tag_list(&project.tags)));
    }
    if !project.description.is_empty() {
        output.push_str(&format!("\n{}\n", project.description));
    }

    output.push_str("\nTasks:\n");
    if project.tasks.is_empty() {
        output.push_str("  (none)\n");
    }
    for task in &project.tasks {
        output.push_str(&format!(
            "  {} {}  {}\n",
            check(task.is_completed),
            task.id,
            task.content
        ));
    }
    output
}

pub fn format_dashboard(dashboard: &ProjectDashboard) -> String {
    let mut output = format!(
        "Projects: {}\nAverage progress: {}%\nHigh priority: {}\n",
        dashboard.total, dashboard.average_progress, dashboard.high_priority
    );
    for (status, count) in &dashboard.status_counts {
        output.push_str(&format!("  {:<12} {}\n", status.to_string(), count));
    }
    output
}

pub fn format_snippet_list(snippets: &[CodeSnippet]) -> String {
    if snippets.is_empty() {
        return "No snippets found".to_string();
    }

    let mut output = String::new();
    for s in snippets {
        let platform = s.platform.as_deref().unwrap_or("-");
        output.push_str(&format!(
            "{}  {:<6} {:<10} {}\n",
            s.id, s.language, platform, s.title
        ));
    }
    output
}

pub fn format_snippet(snippet: &CodeSnippet) -> String {
    let mut output = format!("{} [{}]\n", snippet.title, snippet.language);
    if let Some(platform) = &snippet.platform {
        output.push_str(&format!("Platform: {}\n", platform));
    }
    if let Some(description) = &snippet.description {
        output.push_str(&format!("{}\n", description));
    }
    if !snippet.tags.is_empty() {
        output.push_str(&format!("{}\n", format_tag_list(&snippet.tags)));
    }
    output.push_str(&format!("\n{}", snippet.code));
    if !snippet.code.ends_with('\n') {
        output.push('\n');
    }
    output
}

pub fn format_material_list(materials: &[Material]) -> String {
    if materials.is_empty() {
        return "No materials found".to_string();
    }

    let mut output = String::new();
    for m in materials {
        output.push_str(&format!("{}  {:<5} {:<6} {}\n", m.id, m.kind, m.size, m.name));
        if !m.description.is_empty() {
            output.push_str(&format!("    {}\n", m.description));
        }
        if let Some(link) = &m.link {
            output.push_str(&format!("    {}\n", link));
        }
        if !m.tags.is_empty() {
            output.push_str(&format!("    {}\n", format_tag_list(&m.tags)));
        }
    }
    output
}

pub fn format_plan(plan: &DailyPlan) -> String {
    let mut output = format!("{}  mood: {}\n", plan.date.format("%Y-%m-%d %A"), plan.mood);

    output.push_str("\nSchedule:\n");
    if plan.schedule.is_empty() {
        output.push_str("  (empty)\n");
    }
    for block in &plan.schedule {
        output.push_str(&format!(
            "  {}-{}  {:<9} {}  ({})\n",
            block.start_time, block.end_time, block.kind, block.title, block.id
        ));
    }

    output.push_str("\nTodos:\n");
    if plan.todos.is_empty() {
        output.push_str("  (empty)\n");
    }
    for todo in &plan.todos {
        output.push_str(&format!("  {} {}  {}\n", check(todo.completed), todo.id, todo.text));
    }

    if !plan.summary.is_empty() {
        output.push_str(&format!("\nSummary:\n{}\n", plan.summary));
    }
    output
}

pub fn format_mindmap(view: &MindMapView) -> String {
    if view.nodes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for node in &view.nodes {
        let marker = if view.selected.as_deref() == Some(node.tag.as_str()) {
            "*"
        } else {
            " "
        };
        output.push_str(&format!(
            "{} {:<16} {:>3} note(s)  at ({:.0}, {:.0})\n",
            marker, node.label, node.count, node.x, node.y
        ));
    }

    output.push('\n');
    for note in &view.notes {
        output.push_str(&format!("{}  {}\n", note.id, note.title));
    }
    output
}

pub fn format_pomodoro_history(sessions: &[PomodoroSession]) -> String {
    if sessions.is_empty() {
        return "No sessions recorded".to_string();
    }

    let mut output = String::new();
    for s in sessions {
        output.push_str(&format!(
            "{}  {:>3} min  {}\n",
            format_timestamp(s.start_time),
            s.duration,
            s.task_name
        ));
    }
    let minutes: u32 = sessions.iter().map(|s| s.duration).sum();
    output.push_str(&format!("Total: {} session(s), {} min\n", sessions.len(), minutes));
    output
}

pub fn format_stats(stats: &WorkspaceStats) -> String {
    format!(
        "bookmarks  {}\nnotes      {}\nprojects   {}\nsnippets   {}\nmaterials  {}\nplans      {}\npomodoros  {}\n",
        stats.bookmarks,
        stats.notes,
        stats.projects,
        stats.snippets,
        stats.materials,
        stats.plans,
        stats.pomodoros
    )
}

/// Config listing; the GitHub token is masked.
pub fn format_config(config: &Config) -> String {
    format!(
        "theme = {}\ngithub_token = {}\ngemini_model = {}\ngist_api_url = {}\nlog_level = {}\ncreated = {}\n",
        config.theme,
        config.masked_token(),
        config.gemini_model,
        config.gist_api_url,
        config.log_level,
        config.created.to_rfc3339()
    )
}

use chat_event::adapters::mock::{
    ChatRecord, InMemoryAvatars, InMemoryDirectory, ScriptedAvatarEditor, ScriptedGroupEditor,
};
use chat_event::adapters::{DispatcherChannel, UnicodeMeasurer};
use chat_event::config::{ItemConfig, LayoutMetrics};
use chat_event::events::{Notification, NotificationBus};
use chat_event::models::{EventInfo, OutboundRequest, RequestKind};
use chat_event::terminal::{setup_panic_hook, TerminalManager};
use chat_event::traits::AvatarImage;
use chat_event::ui::theme::{ColorKey, Theme};
use chat_event::{ChatEventItem, Click, Dialogs, Services};

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use futures::StreamExt;
use image::DynamicImage;
use ratatui::backend::Backend;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chat every demo event belongs to.
const DEMO_CHAT: &str = "hikers@chat.agent";

/// Simulated backend round-trip latency.
const BACKEND_LATENCY: Duration = Duration::from_millis(400);

const DEMO_TIMELINE: &str = r#"[
    {"id": 101, "prev_id": 100, "event": {
        "event_type": "group_invite",
        "text": "You created the group \"Hikers\". Add an avatar and a description so people know what it is about.",
        "member_links": []
    }},
    {"id": 102, "prev_id": 101, "event": {
        "event_type": "add_members",
        "text": "You added Alice and Bob",
        "member_links": [
            {"text": "Alice", "target": "alice@uin"},
            {"text": "Bob", "target": "bob@uin"}
        ]
    }},
    {"id": 103, "prev_id": 102, "event": {
        "event_type": "generic",
        "text": "Charlie must solve a captcha at https://example.com/captcha before writing here",
        "captcha_present": true
    }}
]"#;

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    id: i64,
    prev_id: i64,
    event: EventInfo,
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    compact: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("--config needs a path"))?;
                args.config = Some(PathBuf::from(path));
            }
            "--compact" => args.compact = true,
            "--version" => {
                println!("chat-event-demo {}", VERSION);
                std::process::exit(0);
            }
            other => color_eyre::eyre::bail!("Unknown argument: {}", other),
        }
    }
    Ok(args)
}

/// Log to a file: stdout belongs to the terminal UI.
fn init_logging() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("chat-event-demo.log");
    let file = std::fs::File::create(&path)?;
    let filter =
        EnvFilter::try_from_env("CHAT_EVENT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    color_eyre::install()?;
    let log_path = init_logging()?;

    let mut config = match &args.config {
        Some(path) => ItemConfig::load(path)?,
        None => ItemConfig::default(),
    };
    // The terminal grid is measured in cells unless a config says otherwise
    if args.compact || args.config.is_none() {
        config = config.with_metrics(LayoutMetrics::compact());
    }

    tracing::info!(
        "Starting chat-event-demo {} (log: {})",
        VERSION,
        log_path.display()
    );

    setup_panic_hook();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut term = TerminalManager::new()?;
        run_demo(term.terminal(), config).await
    })
}

/// Fake backend: applies edits to the directory after a delay and publishes
/// the notifications a real server push would cause.
async fn run_backend(
    mut rx: mpsc::UnboundedReceiver<OutboundRequest>,
    directory: InMemoryDirectory,
    avatars: InMemoryAvatars,
    bus: NotificationBus,
) {
    while let Some(request) = rx.recv().await {
        tokio::time::sleep(BACKEND_LATENCY).await;
        let contact = request
            .payload
            .get_str("aimid")
            .unwrap_or_default()
            .to_string();
        tracing::info!("Backend handling {} {} for {}", request.kind, request.seq, contact);

        match request.kind {
            RequestKind::ModAbout => {
                directory.apply(&request);
                bus.publish(Notification::ModChatAboutResult {
                    seq: request.seq,
                    error: 0,
                });
            }
            RequestKind::ModName | RequestKind::ModRules => {
                directory.apply(&request);
            }
            RequestKind::ChatInfoGet => {
                bus.publish(Notification::ChatInfoChanged { contact });
            }
            RequestKind::SetAvatar => {
                avatars.set_custom(&contact, true);
                bus.publish(Notification::AvatarChanged { contact });
            }
        }
    }
}

fn demo_theme(alternate: bool) -> Theme {
    if alternate {
        Theme::new()
            .with_color(ColorKey::ChatEventBackground, Color::Rgb(52, 40, 64))
            .with_color(ColorKey::ChatPrimary, Color::Rgb(90, 60, 120))
            .with_color(ColorKey::ChatPrimaryHover, Color::Rgb(110, 76, 146))
    } else {
        Theme::new()
    }
}

async fn run_demo<B: Backend>(terminal: &mut Terminal<B>, config: ItemConfig) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let bus = NotificationBus::new();
    let directory = InMemoryDirectory::new().with_chat(
        DEMO_CHAT,
        ChatRecord {
            name: "Hikers".to_string(),
            is_admin: true,
            ..ChatRecord::default()
        },
    );
    let avatars = InMemoryAvatars::new();
    let (channel, rx) = DispatcherChannel::new();
    tokio::spawn(run_backend(
        rx,
        directory.clone(),
        avatars.clone(),
        bus.clone(),
    ));

    let mut alternate_theme = false;
    let services = Services {
        directory: Arc::new(directory),
        avatars: Arc::new(avatars),
        channel: Arc::new(channel),
        measurer: Arc::new(UnicodeMeasurer),
        theme: Arc::new(demo_theme(alternate_theme)),
        bus,
    };

    let timeline: Vec<TimelineEntry> = serde_json::from_str(DEMO_TIMELINE)?;
    let mut items: Vec<ChatEventItem> = timeline
        .into_iter()
        .map(|entry| {
            ChatEventItem::new(
                entry.id,
                entry.prev_id,
                DEMO_CHAT,
                entry.event,
                services.clone(),
                config.clone(),
            )
        })
        .collect();

    let mut avatar_editor =
        ScriptedAvatarEditor::returning(AvatarImage::new(DynamicImage::new_rgba8(32, 32)));
    let mut group_editor = ScriptedGroupEditor::setting_description("Weekend hikes and trail notes");

    let mut status = String::from("Click a button or link. t: theme, c: clear selection, q: quit");
    let mut width = 0u16;
    let mut needs_redraw = true;
    let mut event_stream = EventStream::new();

    loop {
        if needs_redraw {
            terminal.draw(|frame| {
                let area = frame.area();
                if area.width != width {
                    width = area.width;
                    for item in items.iter_mut() {
                        item.resize(Size::new(width.max(1), 0));
                    }
                }

                let timeline_bottom = area.bottom().saturating_sub(1);
                let mut y = area.y;
                for item in &items {
                    if y >= timeline_bottom {
                        break;
                    }
                    let height = item.height().min(timeline_bottom - y);
                    frame.render_widget(item, Rect::new(area.x, y, area.width, height));
                    y = y.saturating_add(item.height());
                }

                let status_row = Rect::new(area.x, timeline_bottom, area.width, 1);
                frame.render_widget(
                    Paragraph::new(status.as_str()).style(Style::default().fg(Color::DarkGray)),
                    status_row,
                );
            })?;
            needs_redraw = false;
        }

        let tick = tokio::time::sleep(Duration::from_millis(50));

        tokio::select! {
            _ = tick => {
                for item in items.iter_mut() {
                    match item.pump_notifications() {
                        Ok(reactions) => needs_redraw |= !reactions.is_empty(),
                        Err(e) => {
                            tracing::error!(code = e.error_code(), "{}", e);
                            status = e.user_message();
                            needs_redraw = true;
                        }
                    }
                }
            }

            event_result = event_stream.next() => {
                let Some(Ok(event)) = event_result else {
                    return Ok(());
                };
                match event {
                    Event::Resize(_, _) => needs_redraw = true,
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('t') => {
                            alternate_theme = !alternate_theme;
                            let theme = Arc::new(demo_theme(alternate_theme));
                            for item in items.iter_mut() {
                                item.set_theme(Arc::clone(&theme));
                            }
                            needs_redraw = true;
                        }
                        KeyCode::Char('c') => {
                            items.iter_mut().for_each(ChatEventItem::clear_selection);
                            needs_redraw = true;
                        }
                        _ => {}
                    },
                    Event::Mouse(mouse) => {
                        let Some((index, local)) =
                            locate(&items, Position::new(mouse.column, mouse.row))
                        else {
                            continue;
                        };
                        let item = &mut items[index];
                        match mouse.kind {
                            MouseEventKind::Down(MouseButton::Left) => {
                                item.on_pointer_press(local);
                                needs_redraw = true;
                            }
                            MouseEventKind::Up(MouseButton::Left) => {
                                needs_redraw = true;
                                match item.on_pointer_release(local) {
                                    Some(Click::Link(link)) => {
                                        status = format!("Opened {}", link);
                                    }
                                    Some(Click::Button(button)) => {
                                        let dialogs = Dialogs {
                                            avatar: &mut avatar_editor,
                                            group: &mut group_editor,
                                        };
                                        match item.activate(button, dialogs) {
                                            Ok(posted) => {
                                                status = format!(
                                                    "{:?}: posted {} request(s)",
                                                    button,
                                                    posted.len()
                                                );
                                            }
                                            Err(e) => {
                                                tracing::error!(code = e.error_code(), "{}", e);
                                                status = e.user_message();
                                            }
                                        }
                                    }
                                    None => {}
                                }
                            }
                            MouseEventKind::Moved => {
                                needs_redraw |= item.on_pointer_move(local);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Item under a screen position, with the position in item-local coordinates.
fn locate(items: &[ChatEventItem], position: Position) -> Option<(usize, Position)> {
    let mut top = 0u16;
    for (index, item) in items.iter().enumerate() {
        let bottom = top.saturating_add(item.height());
        if position.y >= top && position.y < bottom {
            return Some((index, Position::new(position.x, position.y - top)));
        }
        top = bottom;
    }
    None
}

// ABOUTME: Quote wizard screen - header with progress, step content and navigation footer
// Overlays the confirmation dialog, submission alert and notifications on top

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::confirmation_dialog::{centered, ConfirmationDialogComponent};
use crate::app::state::{AppState, NotificationType};
use crate::app::step_view::{vehicle_hint, Row, RowKind};
use crate::models::PpfPackage;
use crate::wizard::{OpportunityKind, Step, WizardPhase};

pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);
pub const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

/// The quote wizard screen
pub struct WizardView {
    dialog: ConfirmationDialogComponent,
}

impl WizardView {
    pub fn new() -> Self {
        Self { dialog: ConfirmationDialogComponent::new() }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header with progress
                Constraint::Min(10),   // Step content
                Constraint::Length(3), // Navigation footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        match state.phase() {
            WizardPhase::Success => self.render_success(frame, layout[1]),
            WizardPhase::Submitting => self.render_submitting(frame, layout[1]),
            _ => self.render_step(frame, layout[1], state),
        }
        self.render_navigation(frame, layout[2], state);

        if let Some(alert) = state.wizard.submit_alert() {
            self.render_alert(frame, area, alert);
        }
        if let Some(dialog) = &state.confirmation_dialog {
            self.dialog.render(frame, area, dialog);
        }
        self.render_notifications(frame, area, state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Progress indicator
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("🛡️ ", Style::default()),
            Span::styled("ShieldQuote", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  vehicle protection quote", Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, header_layout[0]);

        if state.phase() != WizardPhase::Success {
            frame.render_widget(progress_line(state), header_layout[1]);
        }
    }

    fn render_step(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.wizard.current_step();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", step.title()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(step.description(), Style::default().fg(SOFT_WHITE))),
            Line::from(""),
        ];
        lines.extend(context_lines(state, step));

        let rows = state.rows();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(lines.len() as u16),
                Constraint::Min(rows.len().min(1) as u16),
                Constraint::Length(2), // Inline error
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), layout[0]);

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| row_item(row, idx == state.selected_row))
            .collect();
        frame.render_widget(List::new(items).style(Style::default().bg(PANEL_BG)), layout[1]);

        let error = state
            .wizard
            .validation_error()
            .map(|e| e.to_string())
            .or_else(|| state.wizard.promo_error().map(|e| e.to_string()));
        if let Some(error) = error {
            let widget = Paragraph::new(Line::from(vec![
                Span::styled("✗ ", Style::default().fg(ERROR_RED)),
                Span::styled(error, Style::default().fg(ERROR_RED)),
            ]));
            frame.render_widget(widget, layout[2]);
        }
    }

    fn render_submitting(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Sending ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("🔄 Sending your quote request...", Style::default().fg(GOLD))),
            Line::from(""),
            Line::from(Span::styled("Please wait", Style::default().fg(MUTED_GRAY))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(msg, inner);
    }

    fn render_success(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Thank You ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "✅ Your quote request is on its way!",
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Our team will be in touch using your preferred contact method.",
                Style::default().fg(SOFT_WHITE),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(msg, inner);
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hints: &[(&str, &str)] = match state.phase() {
            WizardPhase::Success => &[("Enter", "New quote"), ("q", "Quit")],
            WizardPhase::Submitting => &[("Ctrl-Q", "Quit")],
            WizardPhase::Reviewing => &[
                ("↑/↓", "Move"),
                ("Enter", "Apply / Submit"),
                ("Esc", "Back"),
                ("Ctrl-R", "Start over"),
            ],
            _ => &[
                ("↑/↓", "Move"),
                ("Space", "Select"),
                ("Enter", "Next"),
                ("Esc", "Back"),
                ("Ctrl-R", "Start over"),
            ],
        };

        let mut spans = vec![Span::styled("  ", Style::default())];
        for (idx, (key, label)) in hints.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
            }
            spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
            spans.push(Span::styled(*key, Style::default().fg(GOLD)));
            spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
            spans.push(Span::styled(format!(" {label}"), Style::default().fg(MUTED_GRAY)));
        }

        let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(nav, inner);
    }

    fn render_alert(&self, frame: &mut Frame, area: Rect, alert: &str) {
        let alert_area = centered(area, 60, 7);
        frame.render_widget(Clear, alert_area);

        let block = Block::default()
            .title(" Submission failed ")
            .title_style(Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_RED))
            .style(Style::default().bg(DARK_BG));
        let inner = block.inner(alert_area);
        frame.render_widget(block, alert_area);

        let text = Paragraph::new(vec![
            Line::from(Span::styled(alert, Style::default().fg(SOFT_WHITE))),
            Line::from(""),
            Line::from(Span::styled("Press Enter to continue", Style::default().fg(MUTED_GRAY))),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
        frame.render_widget(text, inner);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        for (idx, notification) in state.get_current_notifications().iter().rev().take(3).enumerate() {
            let color = match notification.notification_type {
                NotificationType::Success => SELECTION_GREEN,
                NotificationType::Error => ERROR_RED,
                NotificationType::Info => CORNFLOWER_BLUE,
            };
            let width = (notification.message.chars().count() as u16 + 4).min(area.width);
            let rect = Rect {
                x: area.x + area.width.saturating_sub(width + 1),
                y: area.y + 1 + idx as u16 * 3,
                width,
                height: 3,
            };
            if rect.bottom() > area.bottom() {
                break;
            }

            frame.render_widget(Clear, rect);
            let widget = Paragraph::new(notification.message.as_str())
                .style(Style::default().fg(SOFT_WHITE).bg(PANEL_BG))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color)),
                );
            frame.render_widget(widget, rect);
        }
    }
}

impl Default for WizardView {
    fn default() -> Self {
        Self::new()
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(CORNFLOWER_BLUE))
        .style(Style::default().bg(PANEL_BG))
        .title(title)
        .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
}

/// Progress dots with the step counter
fn progress_line(state: &AppState) -> Paragraph<'static> {
    let steps = state.wizard.steps();
    let current = state.wizard.current_index().min(steps.len() - 1);

    let mut spans = vec![Span::styled("  ", Style::default())];
    for idx in 0..steps.len() {
        let (icon, style) = if idx < current {
            ("●", Style::default().fg(SELECTION_GREEN))
        } else if idx == current {
            ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(MUTED_GRAY))
        };
        spans.push(Span::styled(icon, style));
        spans.push(Span::styled(" ", Style::default()));
    }
    spans.push(Span::styled(
        format!(" Step {} of {}", current + 1, steps.len()),
        Style::default().fg(SOFT_WHITE),
    ));

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Step-specific text shown above the rows
fn context_lines(state: &AppState, step: Step) -> Vec<Line<'static>> {
    let quote = state.wizard.quote();
    let mut lines = Vec::new();

    match step {
        Step::PpfAddons if quote.ppf.package.is_some_and(PpfPackage::covers_everything) => {
            lines.push(Line::from(Span::styled(
                "A full wrap already covers every zone. Press Enter to continue.",
                Style::default().fg(WARNING_YELLOW),
            )));
        }
        Step::Vehicle => {
            if let Some(hint) = vehicle_hint(quote) {
                lines.push(Line::from(Span::styled(hint, Style::default().fg(CORNFLOWER_BLUE))));
            }
        }
        Step::Analysis => match state.wizard.opportunities() {
            None => {
                let remaining = state
                    .wizard
                    .pending_transition(Instant::now())
                    .map(|(_, d)| d.as_secs_f32())
                    .unwrap_or_default();
                lines.push(Line::from(Span::styled(
                    format!("🔄 Analyzing your build... {remaining:.1}s"),
                    Style::default().fg(GOLD),
                )));
            }
            Some([]) => {
                lines.push(Line::from(Span::styled(
                    "No extra offers for this build. Taking you to the review...",
                    Style::default().fg(MUTED_GRAY),
                )));
            }
            Some(offers) => {
                for offer in offers {
                    let (tag, color) = match offer.kind {
                        OpportunityKind::FreeAddon => ("FREE", SELECTION_GREEN),
                        OpportunityKind::Upsell => ("SAVE", GOLD),
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("[{tag}] "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                        Span::styled(offer.title.clone(), Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", offer.code), Style::default().fg(MUTED_GRAY)),
                    ]));
                    lines.push(Line::from(Span::styled(
                        format!("       {}", offer.description),
                        Style::default().fg(SOFT_WHITE),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("       {}", offer.reason),
                        Style::default().fg(MUTED_GRAY),
                    )));
                }
                lines.push(Line::from(""));
            }
        },
        Step::Review => {
            for summary in quote.summary_lines() {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(GOLD)),
                    Span::styled(summary, Style::default().fg(SOFT_WHITE)),
                ]));
            }
            lines.push(Line::from(""));
        }
        _ => {}
    }

    lines
}

fn row_item(row: &Row, focused: bool) -> ListItem<'static> {
    let pointer = if focused {
        Span::styled("▸ ", Style::default().fg(GOLD))
    } else {
        Span::styled("  ", Style::default())
    };
    let label_style = if focused {
        Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(SOFT_WHITE)
    };

    let spans = match &row.kind {
        RowKind::Choice(selected) => vec![
            pointer,
            if *selected {
                Span::styled("◉ ", Style::default().fg(SELECTION_GREEN))
            } else {
                Span::styled("○ ", Style::default().fg(MUTED_GRAY))
            },
            Span::styled(row.label.clone(), label_style),
        ],
        RowKind::Toggle(checked) => vec![
            pointer,
            if *checked {
                Span::styled("[✓] ", Style::default().fg(SELECTION_GREEN))
            } else {
                Span::styled("[ ] ", Style::default().fg(MUTED_GRAY))
            },
            Span::styled(row.label.clone(), label_style),
        ],
        RowKind::Field(value) => vec![
            pointer,
            Span::styled(format!("{:<12}", row.label), Style::default().fg(MUTED_GRAY)),
            Span::styled(value.clone(), label_style),
            Span::styled(if focused { "│" } else { "" }, Style::default().fg(GOLD)),
        ],
        RowKind::Action => vec![
            pointer,
            Span::styled(
                format!("[ {} ]", row.label),
                if focused {
                    Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(CORNFLOWER_BLUE)
                },
            ),
        ],
    };

    ListItem::new(Line::from(spans))
}

// ABOUTME: Confirmation dialog component for displaying yes/no prompts with keyboard navigation

use crate::app::state::ConfirmationDialog;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::wizard_view::{CORNFLOWER_BLUE, DARK_BG, GOLD, SOFT_WHITE};

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, dialog: &ConfirmationDialog) {
        let dialog_area = centered(area, 56, 8);

        // Clear only the dialog area so the step underneath stays visible
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(dialog.title.clone())
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(2), // Buttons
            ])
            .split(inner);

        let message = Paragraph::new(dialog.message.clone())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(SOFT_WHITE));
        frame.render_widget(message, chunks[0]);

        let button_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let button_style = |selected: bool| {
            if selected {
                Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SOFT_WHITE)
            }
        };

        let yes_button = Paragraph::new(" Yes ")
            .style(button_style(dialog.selected_option))
            .alignment(Alignment::Center);
        frame.render_widget(yes_button, button_chunks[0]);

        let no_button = Paragraph::new(" No ")
            .style(button_style(!dialog.selected_option))
            .alignment(Alignment::Center);
        frame.render_widget(no_button, button_chunks[1]);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Rect of at most `width` x `height` centred in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4)).max(1);
    let height = height.min(area.height.saturating_sub(2)).max(1);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

// ABOUTME: UI components for the quote wizard TUI

pub mod confirmation_dialog;
pub mod wizard_view;

pub use confirmation_dialog::ConfirmationDialogComponent;
pub use wizard_view::WizardView;

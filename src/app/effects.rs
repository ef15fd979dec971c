use crate::app::{App, Dialog, Message, Model, ToastLevel};
use crate::storage::{clear_snapshot, save_snapshot};

impl App {
    /// Run the storage work a message asks for, after [`crate::app::update`].
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Submit => self.submit(model),
            Message::Refresh => self.refresh(model),
            _ => {}
        }
    }

    fn submit(&mut self, model: &mut Model) {
        match save_snapshot(self.storage.as_mut(), model.editor.content()) {
            Ok(json) => {
                tracing::info!(content = %json, "content saved");
                model.dirty = false;
                model.dialog = Some(Dialog::new("Saved", "Content saved!"));
            }
            Err(err) => {
                tracing::error!(error = %err, storage = %model.storage_label, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    fn refresh(&mut self, model: &mut Model) {
        match clear_snapshot(self.storage.as_mut()) {
            Ok(()) => {
                tracing::info!("saved content cleared");
                model.show_toast(ToastLevel::Info, "Editor cleared");
            }
            Err(err) => {
                tracing::error!(error = %err, storage = %model.storage_label, "clear failed");
                model.show_toast(ToastLevel::Error, format!("Clear failed: {err}"));
            }
        }
    }
}

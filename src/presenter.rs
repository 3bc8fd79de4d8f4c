use crate::game::Notification;
use crate::types::Score;

/// Output side of an interaction adapter.
pub trait Presenter<F> {
    /// `score` is `None` before colors are chosen.
    fn on_render(&mut self, field: &F, score: Option<Score>);
    fn on_message(&mut self, text: &str);
    fn on_game_over(&mut self, result: &str);
    fn on_show_color_prompt(&mut self);
}

/// Delivers notifications to `presenter` in order.
pub fn dispatch<F, P>(notifications: &[Notification<F>], presenter: &mut P)
where
    P: Presenter<F> + ?Sized,
{
    for notification in notifications {
        match notification {
            Notification::Render { field, score } => presenter.on_render(field, *score),
            Notification::Message(text) => presenter.on_message(text),
            Notification::GameOver(result) => presenter.on_game_over(result),
            Notification::ShowColorPrompt => presenter.on_show_color_prompt(),
        }
    }
}

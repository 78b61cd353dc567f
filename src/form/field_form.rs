use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::form::{FieldError, FieldValues, FormEvent, HostedForm, Validator};
use crate::ui::{Component, Handled, Result, TextInput, TextInputEvent};

/// Rows used by one field: label, input, message, gap.
const FIELD_HEIGHT: u16 = 4;

/// Declarative description of a form field.
pub struct FieldSpec {
    name: String,
    label: String,
    placeholder: Option<String>,
    tooltip: Option<String>,
    rules: Vec<Validator>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            tooltip: None,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Help text shown under the input while the field has no error.
    #[must_use]
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Validator) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &str) -> std::result::Result<(), String> {
        self.rules.iter().try_for_each(|rule| rule(value))
    }
}

struct Field {
    spec: FieldSpec,
    input: TextInput,
    error: Option<String>,
}

/// A hosted form made of labelled, validated single-line fields.
///
/// Tab/Down and Shift+Tab/Up move between fields, Enter advances and
/// submits from the last field.
pub struct FieldForm {
    fields: Vec<Field>,
    initial_values: FieldValues,
    focused: usize,
}

impl FieldForm {
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        let fields = specs
            .into_iter()
            .map(|spec| {
                let mut input = TextInput::new();
                if let Some(placeholder) = &spec.placeholder {
                    input = input.with_placeholder(placeholder.clone());
                }
                Field {
                    spec,
                    input,
                    error: None,
                }
            })
            .collect();

        let mut form = Self {
            fields,
            initial_values: FieldValues::new(),
            focused: 0,
        };
        form.reset();
        form
    }

    /// Values the fields start with and return to on reset.
    #[must_use]
    pub fn with_initial_values(mut self, values: FieldValues) -> Self {
        self.initial_values = values;
        self.reset();
        self
    }

    /// Replace the values the next reset restores, leaving the fields as they are.
    pub fn set_initial_values(&mut self, values: FieldValues) {
        self.initial_values = values;
    }

    /// Current raw value of a field.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.input.value())
    }

    /// Programmatically set a field's value, as if typed.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.spec.name == name) {
            field.input.set_value(value);
            field.error = None;
        }
    }

    /// Inline error currently shown for a field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.error.as_deref())
    }

    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.spec.name == name)
    }

    fn focus(&mut self, index: usize) {
        if self.fields.is_empty() {
            return;
        }
        self.focused = index.min(self.fields.len() - 1);
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.input.set_focused(i == self.focused);
        }
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus((self.focused + 1) % self.fields.len());
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus((self.focused + self.fields.len() - 1) % self.fields.len());
        }
    }

    fn is_last_focused(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }

    fn render_field(field: &mut Field, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [label_area, input_area, message_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let label_style = Style::default()
            .fg(theme.subtext1())
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(field.spec.label.clone(), label_style))),
            label_area,
        );

        field.input.render(frame, input_area, theme);

        let message = match (&field.error, &field.spec.tooltip) {
            (Some(error), _) => Span::styled(error.clone(), Style::default().fg(theme.red())),
            (None, Some(tooltip)) => {
                Span::styled(tooltip.clone(), Style::default().fg(theme.overlay1()))
            }
            (None, None) => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(Line::from(message)), message_area);
    }
}

impl Component for FieldForm {
    type Output = FormEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return Ok(Handled::Consumed);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return Ok(Handled::Consumed);
            }
            _ => {}
        }

        let focused = self.focused;
        let Some(field) = self.fields.get_mut(focused) else {
            return Ok(Handled::Ignored);
        };

        Ok(match field.input.handle_key(key)? {
            Handled::Event(TextInputEvent::Changed) => {
                field.error = None;
                Handled::Consumed
            }
            Handled::Event(TextInputEvent::Submitted) => {
                if self.is_last_focused() {
                    FormEvent::Submit.into()
                } else {
                    self.focus_next();
                    Handled::Consumed
                }
            }
            Handled::Event(TextInputEvent::Cancelled) => FormEvent::Dismiss.into(),
            Handled::Consumed => Handled::Consumed,
            Handled::Ignored => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut y = area.y;
        for field in &mut self.fields {
            if y + FIELD_HEIGHT - 1 > area.y + area.height {
                break;
            }
            let field_area = Rect::new(area.x, y, area.width, FIELD_HEIGHT - 1);
            Self::render_field(field, frame, field_area, theme);
            y += FIELD_HEIGHT;
        }
    }
}

impl HostedForm for FieldForm {
    type Values = FieldValues;

    fn validate_and_collect(&mut self) -> std::result::Result<FieldValues, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut values = FieldValues::new();

        for field in &mut self.fields {
            let value = field.input.value().to_string();
            match field.spec.check(&value) {
                Ok(()) => field.error = None,
                Err(message) => {
                    field.error = Some(message.clone());
                    errors.push(FieldError::new(field.spec.name.clone(), message));
                }
            }
            values.insert(field.spec.name.clone(), value);
        }

        if errors.is_empty() {
            return Ok(values);
        }

        if let Some(first_invalid) = self.fields.iter().position(|f| f.error.is_some()) {
            self.focus(first_invalid);
        }
        Err(errors)
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            let initial = self.initial_values.get(&field.spec.name).unwrap_or_default();
            field.input.set_value(initial);
            field.error = None;
        }
        self.focus(0);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::form::validators::{domain_name, required};

    fn form() -> FieldForm {
        FieldForm::new(vec![
            FieldSpec::new("domain", "Domain")
                .rule(required("Please enter a domain"))
                .rule(domain_name(true, "Invalid domain")),
            FieldSpec::new("note", "Note"),
        ])
    }

    fn press(form: &mut FieldForm, code: KeyCode) -> Handled<FormEvent> {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_collects_values_when_valid() {
        let mut form = form();
        form.set_value("domain", "*.example.com");
        let values = form.validate_and_collect().unwrap();
        assert_eq!(values.get("domain"), Some("*.example.com"));
        assert_eq!(values.get("note"), Some(""));
    }

    #[test]
    fn test_reports_first_failing_rule_inline() {
        let mut form = form();
        let errors = form.validate_and_collect().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("domain", "Please enter a domain")]);
        assert_eq!(form.error("domain"), Some("Please enter a domain"));

        form.set_value("domain", "not a domain");
        let errors = form.validate_and_collect().unwrap_err();
        assert_eq!(errors[0].message, "Invalid domain");
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = form();
        assert!(form.validate_and_collect().is_err());
        press(&mut form, KeyCode::Char('a'));
        assert_eq!(form.error("domain"), None);
        assert_eq!(form.value("domain"), Some("a"));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut form = form().with_initial_values(FieldValues::new().with("domain", "example.com"));
        form.set_value("domain", "changed.example.com");
        form.set_value("note", "hello");
        form.reset();
        assert_eq!(form.value("domain"), Some("example.com"));
        assert_eq!(form.value("note"), Some(""));
    }

    #[test]
    fn test_enter_advances_then_submits() {
        let mut form = form();
        assert_eq!(press(&mut form, KeyCode::Enter), Handled::Consumed);
        assert_eq!(press(&mut form, KeyCode::Enter), FormEvent::Submit.into());
        assert_eq!(press(&mut form, KeyCode::Esc), FormEvent::Dismiss.into());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        press(&mut form, KeyCode::BackTab);
        press(&mut form, KeyCode::Char('x'));
        assert_eq!(form.value("note"), Some("x"));
    }
}

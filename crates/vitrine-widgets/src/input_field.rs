//! `InputField` widget for text entry.
//!
//! A single-line input with label, helper/error text, and trailing
//! adornments: a loading spinner, a clear button, and a password-visibility
//! toggle. The spinner suppresses both buttons while active.

use serde::{Deserialize, Serialize};
use std::any::Any;
use vitrine_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, Event, FontWeight, Key, Point, Rect, Size, TextStyle, TypeId,
    Widget,
};

const ADORNMENT_WIDTH: f32 = 28.0;

/// Message emitted when text changes (typing, deletion, or clearing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    /// The new text value
    pub value: String,
}

/// Message emitted when Enter is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSubmitted {
    /// The submitted text value
    pub value: String,
}

/// Message emitted when the password toggle is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordVisibilityChanged {
    /// Whether the password is now shown in plain text
    pub visible: bool,
}

/// Semantic input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Search,
    Tel,
}

/// Visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Outlined,
    Filled,
    Ghost,
}

/// Control size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ControlSize {
    const fn field_height(self) -> f32 {
        match self {
            Self::Sm => 28.0,
            Self::Md => 36.0,
            Self::Lg => 44.0,
        }
    }

    const fn font_size(self) -> f32 {
        match self {
            Self::Sm => 12.0,
            Self::Md => 14.0,
            Self::Lg => 16.0,
        }
    }
}

/// `InputField` widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    /// Current text value
    value: String,
    /// Label shown above the field
    label: String,
    /// Placeholder text
    placeholder: String,
    /// Helper text shown below the field when valid
    helper_text: String,
    /// Error message shown below the field when invalid
    error_message: String,
    /// Whether the field is in an error state
    invalid: bool,
    /// Whether the input is disabled
    disabled: bool,
    /// Whether a trailing spinner is shown
    loading: bool,
    /// Visual variant
    variant: Variant,
    /// Control size
    size: ControlSize,
    /// Semantic input type
    input_type: InputType,
    /// Show a clear button when the value is non-empty
    show_clear_button: bool,
    /// Show a visibility toggle for password inputs
    show_password_toggle: bool,
    /// Maximum length (0 = unlimited)
    max_length: usize,
    text_color: Color,
    placeholder_color: Color,
    background_color: Color,
    border_color: Color,
    focus_border_color: Color,
    error_color: Color,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
    /// Whether focused
    #[serde(skip)]
    focused: bool,
    /// Cursor position (byte index, kept on char boundaries)
    #[serde(skip)]
    cursor: usize,
    /// Whether an obscured password is currently shown
    #[serde(skip)]
    password_visible: bool,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    /// Create a new input field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: String::new(),
            label: String::new(),
            placeholder: String::new(),
            helper_text: String::new(),
            error_message: String::new(),
            invalid: false,
            disabled: false,
            loading: false,
            variant: Variant::Outlined,
            size: ControlSize::Md,
            input_type: InputType::Text,
            show_clear_button: false,
            show_password_toggle: false,
            max_length: 0,
            text_color: Color::BLACK,
            placeholder_color: Color::new(0.6, 0.6, 0.6, 1.0),
            background_color: Color::WHITE,
            border_color: Color::new(0.8, 0.8, 0.8, 1.0),
            focus_border_color: Color::new(0.2, 0.6, 1.0, 1.0),
            error_color: Color::new(0.86, 0.15, 0.15, 1.0),
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
            focused: false,
            cursor: 0,
            password_visible: false,
        }
    }

    /// Set the current value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        if self.max_length > 0 && self.value.chars().count() > self.max_length {
            self.value = self.value.chars().take(self.max_length).collect();
        }
        self.cursor = self.value.len();
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set helper text.
    #[must_use]
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = text.into();
        self
    }

    /// Set the error message shown when invalid.
    #[must_use]
    pub fn error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = text.into();
        self
    }

    /// Set the error state.
    #[must_use]
    pub const fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show the trailing spinner.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the visual variant.
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the control size.
    #[must_use]
    pub const fn size(mut self, size: ControlSize) -> Self {
        self.size = size;
        self
    }

    /// Set the semantic input type.
    #[must_use]
    pub const fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Enable the clear button.
    #[must_use]
    pub const fn show_clear_button(mut self, show: bool) -> Self {
        self.show_clear_button = show;
        self
    }

    /// Enable the password-visibility toggle.
    #[must_use]
    pub const fn show_password_toggle(mut self, show: bool) -> Self {
        self.show_password_toggle = show;
        self
    }

    /// Set maximum length in characters.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        if max > 0 && self.value.chars().count() > max {
            self.value = self.value.chars().take(max).collect();
            self.cursor = self.cursor.min(self.value.len());
        }
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get current value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Check if the value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check if focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Check if in an error state.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Whether an obscured password is currently shown as plain text.
    #[must_use]
    pub const fn is_password_visible(&self) -> bool {
        self.password_visible
    }

    /// Whether the value is currently obscured.
    #[must_use]
    pub fn is_obscured(&self) -> bool {
        self.input_type == InputType::Password && !self.password_visible
    }

    /// Get display text (bulleted when obscured).
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.is_obscured() {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Whether the clear button is currently visible.
    #[must_use]
    pub fn clear_button_visible(&self) -> bool {
        self.show_clear_button && !self.loading && !self.value.is_empty()
    }

    /// Whether the password toggle is currently visible.
    #[must_use]
    pub fn password_toggle_visible(&self) -> bool {
        self.show_password_toggle && !self.loading && self.input_type == InputType::Password
    }

    /// Whether a leading search icon slot is reserved.
    #[must_use]
    pub fn has_leading_icon(&self) -> bool {
        self.input_type == InputType::Search
    }

    /// Empty the value. Returns false when disabled or already empty.
    pub fn clear(&mut self) -> bool {
        if self.disabled || self.value.is_empty() {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        true
    }

    /// Flip password visibility. Returns false when the toggle is hidden.
    pub fn toggle_password_visibility(&mut self) -> bool {
        if !self.password_toggle_visible() {
            return false;
        }
        self.password_visible = !self.password_visible;
        true
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if self.disabled {
            return false;
        }
        let mut changed = false;
        for c in text.chars() {
            if self.max_length > 0 && self.value.chars().count() >= self.max_length {
                break;
            }
            self.value.insert(self.cursor, c);
            self.cursor += c.len_utf8();
            changed = true;
        }
        changed
    }

    fn backspace(&mut self) -> bool {
        if self.disabled || self.cursor == 0 {
            return false;
        }
        let prev = self.value[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, char::len_utf8);
        self.cursor -= prev;
        self.value.remove(self.cursor);
        true
    }

    fn delete(&mut self) -> bool {
        if self.disabled || self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    fn move_left(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Rect of the single-line field itself, below the label.
    fn field_rect(&self) -> Rect {
        let label_height = self.label_height();
        Rect::new(
            self.bounds.x,
            self.bounds.y + label_height,
            self.bounds.width,
            self.size.field_height(),
        )
    }

    fn label_height(&self) -> f32 {
        if self.label.is_empty() {
            0.0
        } else {
            self.size.font_size() + 8.0
        }
    }

    fn caption_height(&self) -> f32 {
        let has_error = self.invalid && !self.error_message.is_empty();
        let has_helper = !self.invalid && !self.helper_text.is_empty();
        if has_error || has_helper {
            self.size.font_size() + 6.0
        } else {
            0.0
        }
    }

    /// Trailing adornment hit areas, right to left.
    fn clear_rect(&self) -> Rect {
        let field = self.field_rect();
        let offset = if self.password_toggle_visible() {
            2.0 * ADORNMENT_WIDTH
        } else {
            ADORNMENT_WIDTH
        };
        Rect::new(field.max_x() - offset, field.y, ADORNMENT_WIDTH, field.height)
    }

    fn toggle_rect(&self) -> Rect {
        let field = self.field_rect();
        Rect::new(
            field.max_x() - ADORNMENT_WIDTH,
            field.y,
            ADORNMENT_WIDTH,
            field.height,
        )
    }

    fn text_changed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(TextChanged {
            value: self.value.clone(),
        }))
    }

    fn handle_mouse_down(&mut self, position: &Point) -> Option<Box<dyn Any + Send>> {
        let field = self.field_rect();
        if !field.contains_point(position) {
            self.focused = false;
            return None;
        }

        if self.clear_button_visible() && self.clear_rect().contains_point(position) {
            if self.clear() {
                return self.text_changed();
            }
            return None;
        }

        if self.password_toggle_visible() && self.toggle_rect().contains_point(position) {
            self.toggle_password_visibility();
            return Some(Box::new(PasswordVisibilityChanged {
                visible: self.password_visible,
            }));
        }

        let was_focused = self.focused;
        self.focused = true;
        if !was_focused {
            self.cursor = self.value.len();
        }
        None
    }

    fn handle_key(&mut self, key: Key) -> Option<Box<dyn Any + Send>> {
        match key {
            Key::Backspace => self.backspace().then(|| self.text_changed()).flatten(),
            Key::Delete => self.delete().then(|| self.text_changed()).flatten(),
            Key::Left => {
                self.move_left();
                None
            }
            Key::Right => {
                self.move_right();
                None
            }
            Key::Home => {
                self.cursor = 0;
                None
            }
            Key::End => {
                self.cursor = self.value.len();
                None
            }
            Key::Enter => Some(Box::new(TextSubmitted {
                value: self.value.clone(),
            })),
            _ => None,
        }
    }
}

impl Widget for InputField {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let height = self.label_height() + self.size.field_height() + self.caption_height();
        let width = 200.0f32.max(constraints.min_width);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let font_size = self.size.font_size();
        let field = self.field_rect();

        if !self.label.is_empty() {
            let style = TextStyle {
                size: font_size,
                color: if self.invalid {
                    self.error_color
                } else {
                    self.text_color
                },
                weight: FontWeight::Bold,
            };
            canvas.draw_text(&self.label, Point::new(self.bounds.x, self.bounds.y), &style);
        }

        let border_color = if self.invalid {
            self.error_color
        } else if self.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        match self.variant {
            Variant::Outlined => {
                canvas.fill_rect(field, self.background_color);
                canvas.stroke_rect(field, border_color, 1.0);
            }
            Variant::Filled => {
                canvas.fill_rect(field, Color::new(0.94, 0.94, 0.94, 1.0));
            }
            Variant::Ghost => {
                canvas.draw_line(
                    Point::new(field.x, field.max_y()),
                    Point::new(field.max_x(), field.max_y()),
                    border_color,
                    2.0,
                );
            }
        }

        let text_x = if self.has_leading_icon() {
            // Leading search icon slot
            canvas.fill_circle(
                Point::new(field.x + 14.0, field.y + field.height / 2.0),
                5.0,
                self.placeholder_color,
            );
            field.x + ADORNMENT_WIDTH
        } else {
            field.x + 10.0
        };
        let text_y = field.y + field.height / 2.0;

        if self.value.is_empty() {
            let style = TextStyle {
                size: font_size,
                color: self.placeholder_color,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(&self.placeholder, Point::new(text_x, text_y), &style);
        } else {
            let style = TextStyle {
                size: font_size,
                color: self.text_color,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(&self.display_text(), Point::new(text_x, text_y), &style);
        }

        if self.loading {
            let center = Point::new(field.max_x() - ADORNMENT_WIDTH / 2.0, text_y);
            canvas.fill_circle(center, 6.0, self.focus_border_color);
        }
        if self.clear_button_visible() {
            let rect = self.clear_rect();
            let style = TextStyle {
                size: font_size,
                color: self.placeholder_color,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(
                "\u{00d7}",
                Point::new(rect.x + rect.width / 2.0, text_y),
                &style,
            );
        }
        if self.password_toggle_visible() {
            let rect = self.toggle_rect();
            let style = TextStyle {
                size: font_size,
                color: self.placeholder_color,
                weight: FontWeight::Normal,
            };
            let glyph = if self.password_visible {
                "\u{1f648}"
            } else {
                "\u{1f441}"
            };
            canvas.draw_text(glyph, Point::new(rect.x + rect.width / 2.0, text_y), &style);
        }

        let caption = if self.invalid && !self.error_message.is_empty() {
            Some((self.error_message.as_str(), self.error_color))
        } else if !self.invalid && !self.helper_text.is_empty() {
            Some((self.helper_text.as_str(), self.placeholder_color))
        } else {
            None
        };
        if let Some((text, color)) = caption {
            let style = TextStyle {
                size: font_size - 2.0,
                color,
                weight: FontWeight::Normal,
            };
            canvas.draw_text(text, Point::new(field.x, field.max_y() + 6.0), &style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        match event {
            Event::MouseDown { position, .. } => self.handle_mouse_down(position),
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::TextInput { text } if self.focused => {
                if self.insert_text(text) {
                    self.text_changed()
                } else {
                    None
                }
            }
            Event::KeyDown { key } if self.focused => self.handle_key(*key),
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or(if self.label.is_empty() {
                None
            } else {
                Some(self.label.as_str())
            })
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

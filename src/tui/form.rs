//! Text fields for one tab.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// Ordered fields with a single focused entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| Field {
                    label,
                    value: String::new(),
                })
                .collect(),
            focus: 0,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of the field at `index`, or `""` past the end.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        if self.focus + 1 < self.fields.len() {
            self.focus += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_go_to_the_focused_field() {
        let mut form = Form::new(&["Loan ID", "Borrower Name"]);
        form.push_char('L');
        form.push_char('1');
        form.focus_next();
        form.push_char('A');
        form.pop_char();
        form.push_char('B');

        assert_eq!(form.value(0), "L1");
        assert_eq!(form.value(1), "B");
        assert_eq!(form.value(5), "");
    }

    #[test]
    fn focus_stays_in_bounds() {
        let mut form = Form::new(&["Loan ID", "Borrower Name"]);
        form.focus_prev();
        assert_eq!(form.focus(), 0);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn empty_form_ignores_edits() {
        let mut form = Form::new(&[]);
        form.push_char('q');
        form.pop_char();
        assert!(form.is_empty());
    }
}

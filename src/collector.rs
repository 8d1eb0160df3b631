use tracing::warn;

use crate::properties::PropertyBag;
use crate::types::Run;

/// Candidate property keys a parser may use to carry a font or face name,
/// tried in order.
const FONT_NAME_KEYS: &[&str] = &[
    "font",
    "fontname",
    "Name",
    "FaceName",
    "PostScriptName",
    "Family",
    "typeface",
    "typefaceName",
];

/// Key tokens recognized when falling back to the bag's serialized form.
const FONT_NAME_MARKERS: &[&str] = &["font-name:", "style:font-name:"];

/// Callback interface driven by the external parser, one method per event
/// kind. Every method has a default no-op body; implementers override only
/// the events they care about.
///
/// Structural events (pages, tables, lists, drawing, ...) are part of the
/// contract so that any parser can drive any visitor, even though this crate
/// only reacts to the text/font subset.
#[allow(unused_variables)]
pub trait DocumentVisitor {
    // Document lifecycle / metadata
    fn set_document_metadata(&mut self, props: &PropertyBag) {}
    fn start_document(&mut self, props: &PropertyBag) {}
    fn end_document(&mut self) {}

    // Pages / headers / footers / styles
    fn define_page_style(&mut self, props: &PropertyBag) {}
    fn define_embedded_font(&mut self, props: &PropertyBag) {}
    fn open_page_span(&mut self, props: &PropertyBag) {}
    fn close_page_span(&mut self) {}
    fn open_header(&mut self, props: &PropertyBag) {}
    fn close_header(&mut self) {}
    fn open_footer(&mut self, props: &PropertyBag) {}
    fn close_footer(&mut self) {}
    fn define_paragraph_style(&mut self, props: &PropertyBag) {}

    // Paragraphs / spans / character styles
    fn open_paragraph(&mut self, props: &PropertyBag) {}
    fn close_paragraph(&mut self) {}
    fn define_character_style(&mut self, props: &PropertyBag) {}
    fn open_span(&mut self, props: &PropertyBag) {}
    fn close_span(&mut self) {}

    // Links / sections
    fn open_link(&mut self, props: &PropertyBag) {}
    fn close_link(&mut self) {}
    fn define_section_style(&mut self, props: &PropertyBag) {}
    fn open_section(&mut self, props: &PropertyBag) {}
    fn close_section(&mut self) {}

    // Text insertion
    fn insert_tab(&mut self) {}
    fn insert_space(&mut self) {}
    fn insert_text(&mut self, text: &str) {}
    fn insert_line_break(&mut self) {}
    fn insert_field(&mut self, props: &PropertyBag) {}

    // Lists
    fn open_ordered_list_level(&mut self, props: &PropertyBag) {}
    fn open_unordered_list_level(&mut self, props: &PropertyBag) {}
    fn close_ordered_list_level(&mut self) {}
    fn close_unordered_list_level(&mut self) {}
    fn open_list_element(&mut self, props: &PropertyBag) {}
    fn close_list_element(&mut self) {}

    // Footnotes / endnotes / comments / text boxes
    fn open_footnote(&mut self, props: &PropertyBag) {}
    fn close_footnote(&mut self) {}
    fn open_endnote(&mut self, props: &PropertyBag) {}
    fn close_endnote(&mut self) {}
    fn open_comment(&mut self, props: &PropertyBag) {}
    fn close_comment(&mut self) {}
    fn open_text_box(&mut self, props: &PropertyBag) {}
    fn close_text_box(&mut self) {}

    // Tables
    fn open_table(&mut self, props: &PropertyBag) {}
    fn open_table_row(&mut self, props: &PropertyBag) {}
    fn close_table_row(&mut self) {}
    fn open_table_cell(&mut self, props: &PropertyBag) {}
    fn insert_covered_table_cell(&mut self, props: &PropertyBag) {}
    fn close_table_cell(&mut self) {}
    fn close_table(&mut self) {}

    // Frames / drawing / binary objects / equations
    fn open_frame(&mut self, props: &PropertyBag) {}
    fn close_frame(&mut self) {}
    fn insert_binary_object(&mut self, props: &PropertyBag) {}
    fn insert_equation(&mut self, props: &PropertyBag) {}
    fn open_group(&mut self, props: &PropertyBag) {}
    fn close_group(&mut self) {}
    fn define_graphic_style(&mut self, props: &PropertyBag) {}
    fn draw_rectangle(&mut self, props: &PropertyBag) {}
    fn draw_ellipse(&mut self, props: &PropertyBag) {}
    fn draw_polygon(&mut self, props: &PropertyBag) {}
    fn draw_polyline(&mut self, props: &PropertyBag) {}
    fn draw_path(&mut self, props: &PropertyBag) {}
    fn draw_connector(&mut self, props: &PropertyBag) {}
}

/// Try to extract a font name from a property bag. Returns `None` if no
/// candidate key holds a non-empty string and the serialized form carries no
/// recognized marker.
pub fn extract_font_name(props: &PropertyBag) -> Option<String> {
    for key in FONT_NAME_KEYS {
        if let Some(value) = props.get_str(key) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    // Fallback: scan the textual representation of the whole bag for a
    // marker like "font-name:", value delimited by , ; ) or newline.
    let serialized = props.prop_string();
    for marker in FONT_NAME_MARKERS {
        if let Some(pos) = serialized.find(marker) {
            let rest = &serialized[pos + marker.len()..];
            let rest = rest.trim_start();
            let end = rest
                .find([',', ';', ')', '\n'])
                .unwrap_or(rest.len());
            let name = rest[..end].trim_end();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }

    None
}

/// Stateful [`DocumentVisitor`] that turns the parser's event stream into an
/// ordered run list, tracking the font context across style-defining events.
///
/// Never panics across a callback boundary: property extraction degrades to
/// a synthetic `font<N>` label when nothing usable is found, warning once
/// per collection pass.
#[derive(Debug)]
pub struct RunCollector {
    runs: Vec<Run>,
    current_font: String,
    font_counter: u32,
    font_name_found_any: bool,
    font_name_warning_emitted: bool,
}

impl Default for RunCollector {
    fn default() -> RunCollector {
        RunCollector::new()
    }
}

impl RunCollector {
    pub fn new() -> RunCollector {
        RunCollector {
            runs: Vec::new(),
            current_font: "default".to_string(),
            font_counter: 0,
            font_name_found_any: false,
            font_name_warning_emitted: false,
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }

    pub fn current_font(&self) -> &str {
        &self.current_font
    }

    /// True if any style-defining event carried a usable font name.
    pub fn font_name_found_any(&self) -> bool {
        self.font_name_found_any
    }

    /// True once the per-pass "no font name in properties" warning fired.
    pub fn font_name_warning_emitted(&self) -> bool {
        self.font_name_warning_emitted
    }

    fn push_run(&mut self, text: impl Into<String>) {
        self.runs.push(Run::new(text, self.current_font.clone()));
    }

    /// Shared handling for every style-defining event. The counter advances
    /// on each one, named or not, so synthetic labels reflect event order.
    fn update_font_context(&mut self, props: &PropertyBag) {
        self.font_counter += 1;
        match extract_font_name(props) {
            Some(name) => {
                self.current_font = name;
                self.font_name_found_any = true;
            }
            None => {
                self.current_font = format!("font{}", self.font_counter);
                if !self.font_name_warning_emitted {
                    warn!("parser did not provide a font name in properties; using generic labels");
                    self.font_name_warning_emitted = true;
                }
            }
        }
    }
}

impl DocumentVisitor for RunCollector {
    fn define_embedded_font(&mut self, props: &PropertyBag) {
        self.update_font_context(props);
    }

    fn define_character_style(&mut self, props: &PropertyBag) {
        self.update_font_context(props);
    }

    fn open_span(&mut self, props: &PropertyBag) {
        self.update_font_context(props);
    }

    fn insert_tab(&mut self) {
        self.push_run("\t");
    }

    fn insert_space(&mut self) {
        self.push_run(" ");
    }

    fn insert_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push_run(text);
        }
    }

    fn insert_line_break(&mut self) {
        self.push_run("\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> PropertyBag {
        pairs.iter().copied().collect()
    }

    #[test]
    fn text_events_append_runs_with_current_font() {
        let mut c = RunCollector::new();
        c.insert_text("before");
        c.open_span(&bag(&[("font", "Arial")]));
        c.insert_text("after");
        c.insert_tab();
        c.insert_space();
        c.insert_line_break();
        assert_eq!(
            c.runs(),
            &[
                Run::new("before", "default"),
                Run::new("after", "Arial"),
                Run::new("\t", "Arial"),
                Run::new(" ", "Arial"),
                Run::new("\n", "Arial"),
            ]
        );
    }

    #[test]
    fn empty_text_appends_nothing() {
        let mut c = RunCollector::new();
        c.insert_text("");
        assert!(c.runs().is_empty());
    }

    #[test]
    fn known_keys_are_tried_in_order() {
        let mut props = PropertyBag::new();
        props.insert_str("Family", "Fallback Family");
        props.insert_str("font", "Winner");
        assert_eq!(extract_font_name(&props), Some("Winner".to_string()));
    }

    #[test]
    fn empty_string_values_are_skipped() {
        let mut props = PropertyBag::new();
        props.insert_str("font", "");
        props.insert_str("FaceName", "Helvetica");
        assert_eq!(extract_font_name(&props), Some("Helvetica".to_string()));
    }

    #[test]
    fn non_string_values_do_not_match() {
        let mut props = PropertyBag::new();
        props.insert("font", crate::properties::PropertyValue::Int(3));
        assert_eq!(extract_font_name(&props), None);
    }

    #[test]
    fn prop_string_fallback_finds_marked_name() {
        // "style:font-name" is not in the candidate key list, so only the
        // serialized-form scan can find it.
        let props = bag(&[("style:font-name", "Times New Roman"), ("lang", "en")]);
        assert_eq!(
            extract_font_name(&props),
            Some("Times New Roman".to_string())
        );
    }

    #[test]
    fn fallback_value_is_trimmed_and_delimited() {
        let props = bag(&[("style:font-name", "  Courier New  "), ("weight", "bold")]);
        // Serialized as "style:font-name:   Courier New  , weight: bold";
        // the comma delimits, surrounding whitespace is trimmed.
        assert_eq!(extract_font_name(&props), Some("Courier New".to_string()));
    }

    #[test]
    fn synthetic_labels_follow_event_order() {
        let mut c = RunCollector::new();
        c.open_span(&PropertyBag::new());
        c.insert_text("one");
        c.define_character_style(&PropertyBag::new());
        c.insert_text("two");
        assert_eq!(
            c.runs(),
            &[Run::new("one", "font1"), Run::new("two", "font2")]
        );
        assert!(!c.font_name_found_any());
    }

    #[test]
    fn counter_advances_on_named_events_too() {
        let mut c = RunCollector::new();
        c.open_span(&bag(&[("font", "Arial")]));
        c.define_embedded_font(&PropertyBag::new());
        c.insert_text("x");
        // Second event is the second style event overall, so the synthetic
        // label is font2, not font1.
        assert_eq!(c.runs(), &[Run::new("x", "font2")]);
        assert!(c.font_name_found_any());
    }

    #[test]
    fn missing_name_warning_latches_once() {
        let mut c = RunCollector::new();
        assert!(!c.font_name_warning_emitted());
        c.open_span(&PropertyBag::new());
        assert!(c.font_name_warning_emitted());
        c.open_span(&PropertyBag::new());
        c.define_character_style(&PropertyBag::new());
        // Still latched; the flag is a one-shot signal, not a counter.
        assert!(c.font_name_warning_emitted());
        assert_eq!(c.current_font(), "font3");
    }

    #[test]
    fn same_name_sequence_yields_same_labels() {
        let events = |c: &mut RunCollector| {
            c.open_span(&bag(&[("font", "Geneva")]));
            c.insert_text("a");
            c.open_span(&bag(&[("font", "Geneva")]));
            c.insert_text("b");
        };
        let mut first = RunCollector::new();
        let mut second = RunCollector::new();
        events(&mut first);
        events(&mut second);
        assert_eq!(first.runs(), second.runs());
        assert!(first.runs().iter().all(|r| r.font == "Geneva"));
    }

    #[test]
    fn structural_events_are_no_ops() {
        let mut c = RunCollector::new();
        let props = bag(&[("font", "ShouldNotApply")]);
        c.open_paragraph(&props);
        c.open_table(&props);
        c.define_page_style(&props);
        c.insert_field(&props);
        c.insert_text("text");
        assert_eq!(c.runs(), &[Run::new("text", "default")]);
    }
}

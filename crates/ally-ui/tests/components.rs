//! Component integration tests - forms, keyboard flow and teardown

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ally_a11y::{AccessibilityAudit, TriState, accessible_name, role_of, AriaRole};
use ally_dom::{Key, KeyModifiers, NodeId};
use ally_runtime::Host;
use ally_ui::{
    Button, ButtonVariant, Checkbox, Component, El, Link, Mounted, Size, Switch, TextField,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn signup_form(submits: &Rc<Cell<u32>>) -> El {
    let s = Rc::clone(submits);
    El::new("form")
        .class("signup")
        .component(Box::new(
            TextField::new("Email")
                .id("email")
                .input_type("email")
                .required(true)
                .helper_text("We never share it."),
        ))
        .component(Box::new(Checkbox::new("Accept terms").id("terms").name("terms")))
        .component(Box::new(Switch::new("Newsletter").id("newsletter").name("newsletter")))
        .component(Box::new(
            Button::new("Sign up")
                .button_type("submit")
                .on_click(move |_: &mut Host, _: ()| s.set(s.get() + 1)),
        ))
        .component(Box::new(Link::new("https://example.com/terms").text("Read the terms")))
}

fn by_id(host: &Host, id: &str) -> NodeId {
    host.document.get_element_by_id(id).unwrap_or_else(|| panic!("no element #{id}"))
}

// ============================================================================
// FORM
// ============================================================================

#[test]
fn test_form_passes_audit() {
    init_tracing();
    let mut host = Host::new();
    let submits = Rc::new(Cell::new(0));
    let body = host.document.body();
    let form = signup_form(&submits).mount(&mut host, body);

    let audit = AccessibilityAudit::run(&host.document, form.root());
    assert!(audit.issues.is_empty(), "{:?}", audit.issues);

    assert_eq!(accessible_name(&host.document, by_id(&host, "email")), "Email");
    assert_eq!(accessible_name(&host.document, by_id(&host, "terms")), "Accept terms");
    assert_eq!(accessible_name(&host.document, by_id(&host, "newsletter")), "Newsletter");
    assert_eq!(role_of(&host.document, by_id(&host, "newsletter")), Some(AriaRole::Switch));
    form.unmount(&mut host);
}

#[test]
fn test_tab_order_through_form() {
    let mut host = Host::new();
    let submits = Rc::new(Cell::new(0));
    let body = host.document.body();
    let form = signup_form(&submits).mount(&mut host, body);

    let mut visited = Vec::new();
    for _ in 0..5 {
        host.press_key(Key::Tab, KeyModifiers::NONE);
        let active = host.active_element();
        visited.push(host.document.tree.tag_name(active).unwrap_or_default().to_string());
    }
    assert_eq!(visited, vec!["input", "input", "button", "button", "a"]);
    assert_eq!(host.document.tree.get_attribute(host.active_element(), "target"), Some("_blank"));

    // wraps to the start
    host.press_key(Key::Tab, KeyModifiers::NONE);
    assert_eq!(host.active_element(), by_id(&host, "email"));
    form.unmount(&mut host);
}

#[test]
fn test_keyboard_submit() {
    let mut host = Host::new();
    let submits = Rc::new(Cell::new(0));
    let body = host.document.body();
    let form = signup_form(&submits).mount(&mut host, body);

    let submit = host
        .document
        .tree
        .descendants(form.root())
        .into_iter()
        .find(|&n| host.document.tree.get_attribute(n, "type") == Some("submit"))
        .unwrap();
    host.focus(submit);
    host.press_key(Key::Enter, KeyModifiers::NONE);
    host.press_key(Key::Space, KeyModifiers::NONE);
    assert_eq!(submits.get(), 2);
    form.unmount(&mut host);
}

#[test]
fn test_unmount_releases_listeners() {
    let mut host = Host::new();
    let submits = Rc::new(Cell::new(0));
    let body = host.document.body();
    let form = signup_form(&submits).mount(&mut host, body);
    assert!(host.total_listeners() >= 3);
    let root = form.root();

    form.unmount(&mut host);
    assert_eq!(host.total_listeners(), 0);
    assert!(!host.document.is_connected(root));
    assert!(host.document.tree.element_children(body).is_empty());
}

// ============================================================================
// CONTROLLED STATE
// ============================================================================

/// Re-renders a checkbox from caller-held state, the way a parent view would
struct CheckboxHarness {
    checked: Rc<Cell<bool>>,
    indeterminate: bool,
    mounted: Option<Mounted>,
}

impl CheckboxHarness {
    fn render(&mut self, host: &mut Host) -> NodeId {
        if let Some(old) = self.mounted.take() {
            old.unmount(host);
        }
        let state = Rc::clone(&self.checked);
        let checkbox = Checkbox::new("Remember me")
            .id("remember")
            .checked(self.checked.get())
            .indeterminate(self.indeterminate)
            .on_checked_change(move |_: &mut Host, next: bool| state.set(next));
        let body = host.document.body();
        self.mounted = Some(checkbox.mount(host, body));
        by_id(host, "remember")
    }
}

#[test]
fn test_controlled_checkbox_round() {
    let mut host = Host::new();
    let mut harness = CheckboxHarness {
        checked: Rc::new(Cell::new(false)),
        indeterminate: false,
        mounted: None,
    };

    let input = harness.render(&mut host);
    assert_eq!(host.document.tree.get_attribute(input, "aria-checked"), Some("false"));
    host.click(input);
    assert!(harness.checked.get());

    let input = harness.render(&mut host);
    assert_eq!(host.document.tree.get_attribute(input, "aria-checked"), Some("true"));
    host.focus(input);
    host.press_key(Key::Space, KeyModifiers::NONE);
    assert!(!harness.checked.get());
}

#[test]
fn test_indeterminate_checkbox_checks_on_click() {
    let mut host = Host::new();
    let mut harness = CheckboxHarness {
        checked: Rc::new(Cell::new(true)),
        indeterminate: true,
        mounted: None,
    };
    let input = harness.render(&mut host);
    assert_eq!(
        host.document.tree.get_attribute(input, "aria-checked"),
        Some(TriState::Mixed.as_str())
    );
    assert!(!host.document.tree.has_attribute(input, "checked"));

    harness.checked.set(false);
    host.click(input);
    assert!(harness.checked.get());
}

#[test]
fn test_switch_toggles_through_label_and_keyboard() {
    let mut host = Host::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    let body = host.document.body();
    let mounted = Switch::new("Dark mode")
        .id("dark")
        .checked(true)
        .size(Size::Sm)
        .on_checked_change(move |_: &mut Host, next: bool| l.borrow_mut().push(next))
        .mount(&mut host, body);

    let track = by_id(&host, "dark");
    host.focus(track);
    host.press_key(Key::Space, KeyModifiers::NONE);
    host.press_key(Key::Enter, KeyModifiers::NONE);
    assert_eq!(*log.borrow(), vec![false, false]);
    mounted.unmount(&mut host);
}

#[test]
fn test_disabled_controls_stay_silent() {
    let mut host = Host::new();
    let events = Rc::new(Cell::new(0));
    let (e1, e2, e3) = (Rc::clone(&events), Rc::clone(&events), Rc::clone(&events));
    let body = host.document.body();
    let form = El::new("div")
        .component(Box::new(
            Checkbox::new("A")
                .id("a")
                .disabled(true)
                .on_checked_change(move |_: &mut Host, _: bool| e1.set(e1.get() + 1)),
        ))
        .component(Box::new(
            Switch::new("B")
                .id("b")
                .disabled(true)
                .on_checked_change(move |_: &mut Host, _: bool| e2.set(e2.get() + 1)),
        ))
        .component(Box::new(
            Button::new("C")
                .disabled(true)
                .on_click(move |_: &mut Host, _: ()| e3.set(e3.get() + 1)),
        ))
        .mount(&mut host, body);

    for node in host.document.tree.descendants(form.root()) {
        host.click(node);
    }
    host.press_key(Key::Tab, KeyModifiers::NONE);
    host.press_key(Key::Space, KeyModifiers::NONE);
    assert_eq!(events.get(), 0);
    form.unmount(&mut host);
}

// ============================================================================
// TEXT FIELD
// ============================================================================

#[test]
fn test_text_field_error_flow() {
    let mut host = Host::new();
    let body = host.document.body();
    let valid = TextField::new("Email")
        .id("email")
        .helper_text("Work address")
        .mount(&mut host, body);
    let input = by_id(&host, "email");
    assert_eq!(host.document.tree.get_attribute(input, "aria-invalid"), Some("false"));
    assert_eq!(host.document.tree.get_attribute(input, "aria-describedby"), Some("email-helper"));
    valid.unmount(&mut host);

    let invalid = TextField::new("Email")
        .id("email")
        .helper_text("Work address")
        .error("Enter a valid address")
        .mount(&mut host, body);
    let input = by_id(&host, "email");
    let tree = &host.document.tree;
    assert_eq!(tree.get_attribute(input, "aria-invalid"), Some("true"));
    assert_eq!(tree.get_attribute(input, "aria-describedby"), Some("email-error"));
    assert!(host.document.get_element_by_id("email-helper").is_none());
    let error = by_id(&host, "email-error");
    assert_eq!(tree.get_attribute(error, "role"), Some("alert"));
    invalid.unmount(&mut host);
}

#[test]
fn test_generated_ids_are_unique() {
    let mut host = Host::new();
    let body = host.document.body();
    let first = TextField::new("First").mount(&mut host, body);
    let second = TextField::new("Second").mount(&mut host, body);

    let ids: Vec<String> = host
        .document
        .tree
        .descendants(body)
        .into_iter()
        .filter(|&n| host.document.tree.tag_name(n) == Some("input"))
        .filter_map(|n| host.document.tree.get_attribute(n, "id").map(str::to_string))
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    let audit = AccessibilityAudit::run(&host.document, body);
    assert!(audit.issues.is_empty(), "{:?}", audit.issues);
    first.unmount(&mut host);
    second.unmount(&mut host);
}

// ============================================================================
// BUTTON AND LINK
// ============================================================================

#[test]
fn test_icon_button_named_by_aria_label() {
    let mut host = Host::new();
    let body = host.document.body();
    let mounted = Button::new("")
        .variant(ButtonVariant::Outline)
        .aria_label("Search")
        .child(Box::new(El::new("span").attr("aria-hidden", "true").text("🔍")))
        .mount(&mut host, body);
    assert_eq!(accessible_name(&host.document, mounted.root()), "Search");
    assert!(AccessibilityAudit::run(&host.document, mounted.root()).issues.is_empty());
    mounted.unmount(&mut host);
}

#[test]
fn test_internal_and_external_links() {
    let mut host = Host::new();
    let body = host.document.body();
    let internal = Link::new("/docs").text("Docs").mount(&mut host, body);
    let external = Link::new("https://example.com").text("Example").mount(&mut host, body);
    let tree = &host.document.tree;

    assert!(!tree.has_attribute(internal.root(), "target"));
    assert_eq!(accessible_name(&host.document, internal.root()), "Docs");

    assert_eq!(tree.get_attribute(external.root(), "rel"), Some("noopener noreferrer"));
    assert_eq!(accessible_name(&host.document, external.root()), "Example (opens in a new tab)");

    let clicks = Rc::new(Cell::new(0));
    let c = Rc::clone(&clicks);
    let tracked = Link::new("/pricing")
        .text("Pricing")
        .on_click(move |_: &mut Host, _: ()| c.set(c.get() + 1))
        .mount(&mut host, body);
    host.focus(tracked.root());
    host.press_key(Key::Enter, KeyModifiers::NONE);
    assert_eq!(clicks.get(), 1);

    internal.unmount(&mut host);
    external.unmount(&mut host);
    tracked.unmount(&mut host);
}

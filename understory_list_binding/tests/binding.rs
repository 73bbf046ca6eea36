// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_list_binding` crate.
//!
//! These drive a `ListBinding` the way a list view and its controller would,
//! using an in-memory host that counts content measurements.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use understory_list_binding::{
    AxisSpec, BindingAdapter, BindingConfig, BindingError, ErrorPolicy, FitConstraints, IndexPath,
    ItemChanges, ItemSizeSpec, ListBinding, ListDelegate, ListHost, ListPresenter, ReusableView,
    ScrollMetrics, SupplementaryHeight, SupplementaryKind, SwipeAction, SwipeActionsConfiguration,
    UpdateCompletion, ViewKind,
};

type Events = Rc<RefCell<Vec<String>>>;

fn at(section: usize, item: usize) -> IndexPath {
    IndexPath::new(section, item)
}

// --- Presenter -----------------------------------------------------------------------

struct Presenter {
    sections: Vec<Vec<String>>,
    spec: ItemSizeSpec,
    header: Option<&'static str>,
    header_height: Option<SupplementaryHeight>,
    selectable: bool,
    swipe: bool,
    events: Events,
}

impl Presenter {
    fn new(sections: &[usize], spec: ItemSizeSpec, events: &Events) -> Self {
        let sections = sections
            .iter()
            .enumerate()
            .map(|(s, &count)| (0..count).map(|i| format!("item {s}.{i}")).collect())
            .collect();
        Self {
            sections,
            spec,
            header: None,
            header_height: None,
            selectable: true,
            swipe: false,
            events: Rc::clone(events),
        }
    }
}

impl ListPresenter for Presenter {
    type Model = String;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn item_identifier(&self, _: IndexPath) -> &str {
        "cell"
    }

    fn item_model(&self, at: IndexPath) -> Option<&String> {
        self.sections.get(at.section)?.get(at.item)
    }

    fn item_size(&self, _: IndexPath) -> ItemSizeSpec {
        self.spec
    }

    fn header_identifier(&self, _: usize) -> Option<&str> {
        self.header
    }

    fn header_height(&self, _: usize) -> SupplementaryHeight {
        self.header_height.unwrap_or(match self.header {
            Some(_) => SupplementaryHeight::Flexible,
            None => SupplementaryHeight::None,
        })
    }

    fn should_select(&self, _: IndexPath) -> bool {
        self.selectable
    }

    fn did_highlight(&mut self, at: IndexPath) {
        self.events
            .borrow_mut()
            .push(format!("presenter highlighted {at}"));
    }

    fn did_select(&mut self, at: IndexPath) {
        self.events.borrow_mut().push(format!("presenter selected {at}"));
    }

    fn trailing_swipe_actions(&self, _: IndexPath) -> Option<SwipeActionsConfiguration> {
        self.swipe.then(|| SwipeActionsConfiguration {
            actions: vec![SwipeAction {
                identifier: "delete".into(),
                title: "Delete".into(),
                destructive: true,
            }],
            performs_first_action_with_full_swipe: true,
        })
    }
}

// --- View and host ---------------------------------------------------------------------

struct TestView {
    text: String,
    frame: Size,
    focused: bool,
    measurements: Rc<Cell<usize>>,
    events: Events,
}

impl ReusableView<String> for TestView {
    fn configure(&mut self, model: &String) {
        self.text.clone_from(model);
    }

    fn frame_size(&self) -> Size {
        self.frame
    }

    fn fitting_size(&mut self, constraints: FitConstraints) -> Size {
        self.measurements.set(self.measurements.get() + 1);
        Size::new(constraints.width.unwrap_or(120.0), 44.0)
    }

    fn set_highlighted(&mut self, highlighted: bool, _: bool) {
        self.events
            .borrow_mut()
            .push(format!("view highlighted {highlighted} ({})", self.text));
    }

    fn set_selected(&mut self, selected: bool, _: bool) {
        self.events
            .borrow_mut()
            .push(format!("view selected {selected} ({})", self.text));
    }

    fn become_first_responder(&mut self) -> bool {
        self.focused = true;
        true
    }

    fn resign_first_responder(&mut self) -> bool {
        let was = self.focused;
        self.focused = false;
        was
    }
}

struct TestHost {
    container: Size,
    registered: Vec<&'static str>,
    visible: Vec<(IndexPath, TestView)>,
    measurements: Rc<Cell<usize>>,
    events: Events,
    ops: Vec<String>,
    complete_immediately: bool,
    pending: Vec<UpdateCompletion>,
}

impl TestHost {
    fn new(events: &Events) -> Self {
        Self {
            container: Size::new(320.0, 480.0),
            registered: vec!["cell", "header"],
            visible: Vec::new(),
            measurements: Rc::new(Cell::new(0)),
            events: Rc::clone(events),
            ops: Vec::new(),
            complete_immediately: true,
            pending: Vec::new(),
        }
    }

    fn view(&self, text: &str, frame: Size) -> TestView {
        TestView {
            text: text.into(),
            frame,
            focused: false,
            measurements: Rc::clone(&self.measurements),
            events: Rc::clone(&self.events),
        }
    }

    fn show(&mut self, at: IndexPath, text: &str) {
        let view = self.view(text, Size::new(320.0, 44.0));
        self.visible.push((at, view));
    }
}

impl ListHost for TestHost {
    type View = TestView;

    fn container_size(&self) -> Size {
        self.container
    }

    fn dequeue(&mut self, _: ViewKind, identifier: &str, _: IndexPath) -> Option<TestView> {
        self.registered
            .iter()
            .any(|registered| *registered == identifier)
            .then(|| self.view("", Size::ZERO))
    }

    fn visible_view_mut(&mut self, at: IndexPath) -> Option<&mut TestView> {
        self.visible
            .iter_mut()
            .find(|(path, _)| *path == at)
            .map(|(_, view)| view)
    }

    fn reload_data(&mut self) {
        self.ops.push("reload data".into());
    }

    fn begin_updates(&mut self) {
        self.ops.push("begin".into());
    }

    fn end_updates(&mut self, completion: UpdateCompletion) {
        self.ops.push("end".into());
        if self.complete_immediately {
            completion(true);
        } else {
            self.pending.push(completion);
        }
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        self.ops.push(format!("insert {}", list(paths)));
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        self.ops.push(format!("delete {}", list(paths)));
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        self.ops.push(format!("reload {}", list(paths)));
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        self.ops.push(format!("move {from} -> {to}"));
    }

    fn insert_sections(&mut self, sections: &[usize]) {
        self.ops.push(format!("insert sections {sections:?}"));
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        self.ops.push(format!("delete sections {sections:?}"));
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        self.ops.push(format!("reload sections {sections:?}"));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.ops.push(format!("move section {from} -> {to}"));
    }
}

fn list(paths: &[IndexPath]) -> String {
    let paths: Vec<String> = paths.iter().map(ToString::to_string).collect();
    paths.join(", ")
}

type Binding = ListBinding<Presenter, TestHost>;

fn binding(sections: &[usize], spec: ItemSizeSpec) -> (Binding, Events) {
    binding_with(sections, spec, BindingConfig::default())
}

fn binding_with(sections: &[usize], spec: ItemSizeSpec, config: BindingConfig) -> (Binding, Events) {
    let events = Events::default();
    let presenter = Presenter::new(sections, spec, &events);
    let host = TestHost::new(&events);
    let adapter = BindingAdapter::new(presenter, host).with_config(config);
    (ListBinding::new(adapter), events)
}

fn sync_counts(binding: &mut Binding) {
    let adapter = binding.adapter_mut();
    for section in 0..adapter.section_count() {
        adapter.item_count(section);
    }
}

fn measurements(binding: &Binding) -> usize {
    binding.adapter().host().measurements.get()
}

// --- Sizing ------------------------------------------------------------------------------

#[test]
fn cached_sizes_survive_section_removal() {
    let (mut binding, _) = binding(&[3, 3], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    assert_eq!(binding.adapter().cache().section_count(), 2);
    assert_eq!(binding.adapter().cache().item_count(1), 3);

    // First query measures; rendering then records the laid-out size.
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 44.0));
    assert_eq!(adapter.size_for_item(at(1, 0)), Size::new(120.0, 44.0));
    assert_eq!(adapter.size_for_item(at(1, 2)), Size::new(120.0, 44.0));
    let mut view = adapter.provide_item_view(at(0, 0)).unwrap();
    assert_eq!(view.text, "item 0.0");
    view.frame = Size::new(120.0, 44.0);
    adapter.will_display_item(&view, at(0, 0));
    assert_eq!(measurements(&binding), 3);

    // Second query is served from the cache.
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 44.0));
    assert_eq!(measurements(&binding), 3);

    binding.adapter_mut().presenter_mut().sections.remove(0);
    binding
        .update(|batch| batch.delete_sections(&[0]), |_| {})
        .unwrap();

    let adapter = binding.adapter_mut();
    assert_eq!(adapter.section_count(), 1);
    assert_eq!(adapter.item_count(0), 3);
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 44.0));
    assert_eq!(adapter.size_for_item(at(0, 2)), Size::new(120.0, 44.0));
    assert_eq!(measurements(&binding), 3);
    assert_eq!(
        binding.adapter().host().ops,
        ["begin", "delete sections [0]", "end"]
    );
}

#[test]
fn rendered_size_replaces_measured_size() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 44.0));

    let mut view = adapter.provide_item_view(at(0, 0)).unwrap();
    view.frame = Size::new(120.0, 40.0);
    adapter.will_display_item(&view, at(0, 0));
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 40.0));

    // The view settled at a different height before going off screen.
    view.frame = Size::new(120.0, 52.0);
    adapter.did_end_displaying_item(&view, at(0, 0));
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(120.0, 52.0));

    // Views for items that no longer exist are ignored.
    adapter.did_end_displaying_item(&view, at(0, 9));
    assert_eq!(measurements(&binding), 1);
}

#[test]
fn container_resize_forces_remeasurement() {
    let (mut binding, _) = binding(&[2], ItemSizeSpec::columns_with_flexible_height(1.0));
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(320.0, 44.0));
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(320.0, 44.0));

    adapter.host_mut().container = Size::new(480.0, 320.0);
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::new(480.0, 44.0));
    assert_eq!(adapter.cache().epoch(), 1);
    assert_eq!(measurements(&binding), 2);
}

#[test]
fn fixed_specs_do_not_measure() {
    let spec = ItemSizeSpec::new(AxisSpec::FillEqually(2.0), AxisSpec::AspectRatio(0.5));
    let (mut binding, _) = binding(&[4], spec);
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 3)), Size::new(160.0, 80.0));
    assert_eq!(adapter.scratch_view_count(), 0);
    assert_eq!(measurements(&binding), 0);
}

#[test]
fn scratch_views_are_reused_within_a_layout_pass() {
    let (mut binding, _) = binding(&[3], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    for item in 0..3 {
        adapter.size_for_item(at(0, item));
    }
    assert_eq!(adapter.scratch_view_count(), 1);
    adapter.finish_layout_pass();
    assert_eq!(adapter.scratch_view_count(), 0);
    assert_eq!(measurements(&binding), 3);
}

#[test]
fn dual_aspect_ratio_is_logged_and_not_cached() {
    let spec = ItemSizeSpec::new(AxisSpec::AspectRatio(1.0), AxisSpec::AspectRatio(1.0));
    let config = BindingConfig::default().with_error_policy(ErrorPolicy::Log);
    let (mut binding, _) = binding_with(&[1], spec, config);
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_item(at(0, 0)), Size::ZERO);
    assert_eq!(adapter.cache().item(at(0, 0)), None);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "cannot both be sized by aspect ratio")]
fn dual_aspect_ratio_asserts_by_default() {
    let spec = ItemSizeSpec::new(AxisSpec::AspectRatio(1.0), AxisSpec::AspectRatio(1.0));
    let (mut binding, _) = binding(&[1], spec);
    sync_counts(&mut binding);
    binding.adapter_mut().size_for_item(at(0, 0));
}

#[test]
#[should_panic(expected = "identifier \"cell\"")]
fn missing_view_panics_under_panic_policy() {
    let config = BindingConfig::default().with_error_policy(ErrorPolicy::Panic);
    let (mut binding, _) = binding_with(&[1], ItemSizeSpec::flexible(), config);
    binding.configure(|host| host.registered.clear());
    binding.adapter_mut().provide_item_view(at(0, 0));
}

#[test]
fn headers_are_measured_once_and_footers_default_to_nothing() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    binding.adapter_mut().presenter_mut().header = Some("header");
    sync_counts(&mut binding);

    let adapter = binding.adapter_mut();
    assert_eq!(
        adapter.presenter().header_height(0),
        SupplementaryHeight::Flexible
    );
    assert_eq!(adapter.size_for_header(0), Size::new(320.0, 44.0));
    assert_eq!(adapter.size_for_header(0), Size::new(320.0, 44.0));
    assert_eq!(adapter.size_for_footer(0), Size::ZERO);
    assert!(adapter.provide_footer_view(0).is_none());
    assert!(adapter.provide_header_view(0).is_some());
    assert_eq!(measurements(&binding), 1);
}

#[test]
fn flexible_header_without_identifier_is_empty() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    binding.adapter_mut().presenter_mut().header_height = Some(SupplementaryHeight::Flexible);
    sync_counts(&mut binding);

    // No view to measure with, so the header takes no space and nothing is reported.
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.size_for_header(0), Size::ZERO);
    assert_eq!(adapter.cache().header(0), None);
    assert!(adapter.provide_header_view(0).is_none());
    assert_eq!(measurements(&binding), 0);
}

// --- Batches -------------------------------------------------------------------------

#[test]
fn section_edits_keep_sizes_with_their_sections() {
    let (mut binding, _) = binding(&[1, 2, 3], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    for section in 0..3 {
        for item in 0..=section {
            let mut view = adapter.provide_item_view(at(section, item)).unwrap();
            view.frame = Size::new(100.0, (10 * section + item + 1) as f64);
            adapter.will_display_item(&view, at(section, item));
        }
    }

    // A, B, C becomes B, new, C, A, with B reloaded.
    let sections = &mut binding.adapter_mut().presenter_mut().sections;
    let first = sections.remove(0);
    sections.push(first);
    sections.insert(1, vec!["new".into()]);
    binding
        .update(
            |batch| {
                batch.move_section(0, 2);
                batch.insert_sections(&[1]);
                batch.reload_sections(&[0]);
            },
            |_| {},
        )
        .unwrap();
    assert_eq!(
        binding.adapter().host().ops,
        [
            "begin",
            "move section 0 -> 2",
            "insert sections [1]",
            "reload sections [0]",
            "end"
        ]
    );

    sync_counts(&mut binding);
    let cache = binding.adapter().cache();
    let presenter = binding.adapter().presenter();
    assert_eq!(cache.section_count(), presenter.section_count());
    for section in 0..presenter.section_count() {
        assert_eq!(cache.item_count(section), presenter.item_count(section));
    }

    // C kept its rendered sizes at its new index.
    let adapter = binding.adapter_mut();
    for item in 0..3 {
        assert_eq!(
            adapter.size_for_item(at(2, item)),
            Size::new(100.0, (21 + item) as f64)
        );
    }
    assert_eq!(measurements(&binding), 0);

    // B was reloaded, the new section and the moved A were never measured.
    let adapter = binding.adapter_mut();
    assert_eq!(adapter.cache().item(at(0, 0)), None);
    assert_eq!(adapter.cache().item(at(1, 0)), None);
    assert_eq!(adapter.cache().item(at(3, 0)), None);
    assert_eq!(adapter.size_for_item(at(3, 0)), Size::new(120.0, 44.0));
    assert_eq!(measurements(&binding), 1);
}

#[test]
fn item_changes_apply_deletes_then_inserts_then_reloads() {
    let (mut binding, _) = binding(&[5], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    for item in 0..5 {
        let mut view = adapter.provide_item_view(at(0, item)).unwrap();
        view.frame = Size::new(100.0, 10.0 * item as f64);
        adapter.will_display_item(&view, at(0, item));
    }

    let changes = ItemChanges {
        deleted: [0, 2, 4].into_iter().collect(),
        inserted: [1, 0].into_iter().collect(),
        modified: [3].into_iter().collect(),
    };
    let finished = Rc::new(Cell::new(None));
    let seen = Rc::clone(&finished);
    binding
        .update(
            |batch| batch.apply_item_changes(0, &changes),
            move |done| seen.set(Some(done)),
        )
        .unwrap();
    assert_eq!(finished.get(), Some(true));

    let cache = binding.adapter().cache();
    assert_eq!(cache.item_count(0), 4);
    assert_eq!(cache.item(at(0, 0)), None);
    assert_eq!(cache.item(at(0, 1)), None);
    assert_eq!(cache.item(at(0, 2)), Some(Size::new(100.0, 10.0)));
    assert_eq!(cache.item(at(0, 3)), None);
    assert_eq!(
        binding.adapter().host().ops[1..4],
        [
            "delete [0, 0], [0, 2], [0, 4]",
            "insert [0, 1], [0, 0]",
            "reload [0, 3]",
        ]
    );
}

#[test]
fn moved_items_keep_their_size() {
    let (mut binding, _) = binding(&[3], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    let adapter = binding.adapter_mut();
    let mut view = adapter.provide_item_view(at(0, 0)).unwrap();
    view.frame = Size::new(120.0, 70.0);
    adapter.will_display_item(&view, at(0, 0));

    let mut batch = binding.begin_batch_update().unwrap();
    batch.move_item(at(0, 0), at(0, 2));
    batch.end(|_| {});

    assert_eq!(
        binding.adapter().cache().item(at(0, 2)),
        Some(Size::new(120.0, 70.0))
    );
}

#[test]
fn second_batch_waits_for_completion() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    binding.configure(|host| host.complete_immediately = false);

    let batch = binding.begin_batch_update().unwrap();
    drop(batch);
    assert!(binding.is_batch_in_progress());
    assert_eq!(
        binding.begin_batch_update().unwrap_err(),
        BindingError::BatchUpdateInProgress
    );
    assert_eq!(
        binding.update(|_| panic!("must not run"), |_| {}),
        Err(BindingError::BatchUpdateInProgress)
    );

    let completion = binding.adapter_mut().host_mut().pending.pop().unwrap();
    completion(true);
    assert!(!binding.is_batch_in_progress());
    assert!(binding.begin_batch_update().is_ok());
}

#[test]
fn reload_clears_the_cache() {
    let (mut binding, _) = binding(&[2], ItemSizeSpec::flexible());
    sync_counts(&mut binding);
    binding.adapter_mut().size_for_item(at(0, 0));
    binding.reload();
    assert_eq!(binding.adapter().cache().section_count(), 0);
    assert_eq!(binding.adapter().host().ops, ["reload data"]);
}

// --- Interaction ---------------------------------------------------------------------

#[test]
fn visual_state_changes_before_presenter_hears() {
    let (mut binding, events) = binding(&[1], ItemSizeSpec::flexible());
    binding.configure(|host| host.show(at(0, 0), "first"));

    let adapter = binding.adapter_mut();
    adapter.did_highlight(at(0, 0));
    adapter.did_select(at(0, 0));
    // Not visible: only the presenter is told.
    adapter.did_highlight(at(0, 1));

    assert_eq!(
        *events.borrow(),
        [
            "view highlighted true (first)",
            "presenter highlighted [0, 0]",
            "view selected true (first)",
            "presenter selected [0, 0]",
            "presenter highlighted [0, 1]",
        ]
    );
}

#[test]
fn will_select_respects_the_presenter() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    assert_eq!(binding.adapter().will_select(at(0, 0)), Some(at(0, 0)));
    binding.adapter_mut().presenter_mut().selectable = false;
    assert_eq!(binding.adapter().will_select(at(0, 0)), None);
    assert!(binding.adapter().should_highlight(at(0, 0)));
}

#[test]
fn rows_with_swipe_actions_are_editable() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    assert!(!binding.adapter().can_edit(at(0, 0)));
    binding.adapter_mut().presenter_mut().swipe = true;
    assert!(binding.adapter().can_edit(at(0, 0)));
    let actions = binding.adapter().trailing_swipe_actions(at(0, 0)).unwrap();
    assert_eq!(actions.actions[0].identifier, "delete");
    assert!(binding.adapter().leading_swipe_actions(at(0, 0)).is_none());
}

#[test]
fn first_responder_needs_a_visible_view() {
    let (mut binding, _) = binding(&[2], ItemSizeSpec::flexible());
    assert!(!binding.become_first_responder(at(0, 1)));

    binding.configure(|host| host.show(at(0, 1), "second"));
    assert!(binding.become_first_responder(at(0, 1)));
    assert!(binding.resign_first_responder(at(0, 1)));
    assert!(!binding.resign_first_responder(at(0, 1)));
}

#[test]
fn reconfigure_updates_the_visible_view() {
    let (mut binding, _) = binding(&[1], ItemSizeSpec::flexible());
    binding.configure(|host| host.show(at(0, 0), "stale"));
    binding.adapter_mut().presenter_mut().sections[0][0] = "fresh".into();

    assert!(binding.reconfigure_item(at(0, 0)));
    let host = binding.adapter_mut().host_mut();
    assert_eq!(host.visible_view_mut(at(0, 0)).unwrap().text, "fresh");
    assert!(!binding.reconfigure_item(at(0, 5)));
}

// --- Delegate --------------------------------------------------------------------------

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl ListDelegate<TestView> for Recorder {
    fn will_display_item(&mut self, _: &TestView, at: IndexPath) {
        self.events.push(format!("will display {at}"));
    }

    fn will_display_supplementary(&mut self, _: &TestView, kind: SupplementaryKind, section: usize) {
        self.events.push(format!("will display {kind:?} {section}"));
    }

    fn did_scroll(&mut self, _: ScrollMetrics) {
        self.events.push("scroll".into());
    }

    fn did_zoom(&mut self, metrics: ScrollMetrics) {
        self.events.push(format!("zoom {}", metrics.zoom_scale));
    }

    fn will_end_dragging(&mut self, _: ScrollMetrics, _: Vec2, target: &mut Point) {
        target.y = 0.0;
    }

    fn should_scroll_to_top(&mut self, _: ScrollMetrics) -> bool {
        false
    }
}

#[test]
fn events_reach_the_delegate() {
    let events = Events::default();
    let presenter = Presenter::new(&[1], ItemSizeSpec::flexible(), &events);
    let host = TestHost::new(&events);
    let mut recorder = Recorder::default();
    {
        let mut adapter = BindingAdapter::with_delegate(presenter, host, &mut recorder);
        adapter.section_count();
        adapter.item_count(0);

        let view = adapter.host().view("x", Size::new(320.0, 44.0));
        adapter.will_display_item(&view, at(0, 0));
        adapter.will_display_supplementary(&view, SupplementaryKind::Header, 0);

        let metrics = ScrollMetrics {
            zoom_scale: 2.0,
            ..ScrollMetrics::default()
        };
        adapter.did_scroll(metrics);
        adapter.did_zoom(metrics);

        let mut target = Point::new(0.0, 300.0);
        adapter.will_end_dragging(metrics, Vec2::new(0.0, 1.0), &mut target);
        assert_eq!(target, Point::ZERO);
        assert!(!adapter.should_scroll_to_top(metrics));
        assert_eq!(adapter.cache().header(0), Some(Size::new(320.0, 44.0)));
    }
    assert_eq!(
        recorder.events,
        ["will display [0, 0]", "will display Header 0", "scroll", "zoom 2"]
    );
}

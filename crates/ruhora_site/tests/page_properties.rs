use ruhora_animation::MotionRuntime;
use ruhora_core::{ElementId, KeyCode, Modifiers, Viewport, VisualState};
use ruhora_site::{NavItem, OverlayState, Page, PageAction};

fn mounted(reduced_motion: bool) -> (MotionRuntime, Page) {
    let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), reduced_motion);
    let mut page = Page::mount(&mut rt);
    page.animate(&mut rt).unwrap();
    (rt, page)
}

fn run(rt: &mut MotionRuntime, page: &mut Page, ms: u32) {
    for _ in 0..ms / 16 + 1 {
        page.tick(rt, 16.0);
    }
}

fn element(rt: &MotionRuntime, label: &str) -> ElementId {
    rt.scene().require(label).unwrap()
}

fn styles(rt: &MotionRuntime) -> Vec<(String, VisualState)> {
    rt.scene()
        .iter()
        .map(|(_, el)| (el.label.clone(), el.style))
        .collect()
}

#[test]
fn journal_keeps_at_most_one_card_expanded() {
    let (mut rt, mut page) = mounted(false);
    let toggle = |rt: &MotionRuntime, id: u32| element(rt, &format!("journal-toggle-{id}"));

    let first = toggle(&rt, 1);
    assert_eq!(page.click(&mut rt, first).unwrap(), PageAction::JournalToggled(1));
    assert_eq!(page.expanded_entry(), Some(1));

    let third = toggle(&rt, 3);
    page.click(&mut rt, third).unwrap();
    assert_eq!(page.expanded_entry(), Some(3));
    assert!(!page.journal().is_expanded(1));

    page.click(&mut rt, third).unwrap();
    assert_eq!(page.expanded_entry(), None);

    run(&mut rt, &mut page, 1000);
    for id in 1..=3 {
        let full = element(&rt, &format!("journal-full-{id}"));
        assert!(!rt.scene().style(full).unwrap().display);
    }
}

#[test]
fn second_overlay_open_is_ignored() {
    let (mut rt, mut page) = mounted(false);
    let first = page.showcase().blocks()[0].cta();
    let second = page.showcase().blocks()[1].cta();

    page.click(&mut rt, first).unwrap();
    let product = page.showcase().blocks()[0].product();
    assert_eq!(page.overlay_state(), OverlayState::Open(product));

    assert_eq!(page.click(&mut rt, second).unwrap(), PageAction::Ignored);
    assert_eq!(page.overlay_state(), OverlayState::Open(product));
}

#[test]
fn escape_and_backdrop_close_only_when_open() {
    let (mut rt, mut page) = mounted(true);

    assert_eq!(
        page.key(&mut rt, KeyCode::ESCAPE, Modifiers::NONE).unwrap(),
        PageAction::Ignored
    );
    assert_eq!(page.overlay_state(), OverlayState::Closed);

    let cta = page.showcase().blocks()[1].cta();
    page.click(&mut rt, cta).unwrap();
    assert_eq!(
        page.key(&mut rt, KeyCode::ESCAPE, Modifiers::NONE).unwrap(),
        PageAction::OverlayClosed
    );
    assert_eq!(page.overlay_state(), OverlayState::Closed);

    page.click(&mut rt, cta).unwrap();
    let backdrop = page.overlay().backdrop().unwrap();
    assert_eq!(page.click(&mut rt, backdrop).unwrap(), PageAction::OverlayClosed);
    assert_eq!(page.overlay_state(), OverlayState::Closed);
    assert!(!rt.scene().is_scroll_locked());
}

#[test]
fn overlay_close_animates_before_removal() {
    let (mut rt, mut page) = mounted(false);
    let cta = page.showcase().blocks()[0].cta();
    page.click(&mut rt, cta).unwrap();
    run(&mut rt, &mut page, 1500);

    let close = page.overlay().close_button().unwrap();
    page.click(&mut rt, close).unwrap();
    assert!(matches!(page.overlay_state(), OverlayState::Closing(_)));
    assert_eq!(
        page.key(&mut rt, KeyCode::ESCAPE, Modifiers::NONE).unwrap(),
        PageAction::Ignored
    );

    run(&mut rt, &mut page, 600);
    assert_eq!(page.overlay_state(), OverlayState::Closed);
    assert!(rt.scene().find("ritual-overlay-backdrop").is_none());
}

#[test]
fn focus_trap_wraps_in_both_directions() {
    let (mut rt, mut page) = mounted(false);
    let cta = page.showcase().blocks()[0].cta();
    page.click(&mut rt, cta).unwrap();

    let close = page.overlay().close_button().unwrap();
    let order = page.overlay().order_button().unwrap();
    assert_eq!(rt.scene().focused(), Some(close));

    assert_eq!(
        page.key(&mut rt, KeyCode::TAB, Modifiers::shift_only()).unwrap(),
        PageAction::FocusMoved(order)
    );
    assert_eq!(
        page.key(&mut rt, KeyCode::TAB, Modifiers::NONE).unwrap(),
        PageAction::FocusMoved(close)
    );
    assert_eq!(
        page.key(&mut rt, KeyCode::TAB, Modifiers::NONE).unwrap(),
        PageAction::FocusMoved(order)
    );
}

#[test]
fn reduced_motion_settles_everything_and_ignores_scroll() {
    let (mut rt, mut page) = mounted(true);

    for id in page.controlled() {
        let style = rt.scene().style(id).unwrap();
        assert!(style.is_revealed(), "{:?} not revealed", rt.scene().label(id));
    }
    assert!(rt.observers().is_empty());
    assert_eq!(rt.listener_count(), 0);
    assert!(!rt.scheduler().has_active_animations());

    let before = styles(&rt);
    page.scroll(&mut rt, 4000.0);
    run(&mut rt, &mut page, 500);
    assert_eq!(styles(&rt), before);
    assert!(!rt.scheduler().has_active_animations());
}

#[test]
fn teardown_twice_leaves_nothing_running() {
    let (mut rt, mut page) = mounted(false);
    assert!(!rt.observers().is_empty());
    assert!(rt.listener_count() > 0);

    page.teardown(&mut rt);
    page.teardown(&mut rt);
    assert!(rt.observers().is_empty());
    assert_eq!(rt.listener_count(), 0);
    assert!(!rt.scheduler().has_active_animations());

    page.unmount(&mut rt);
    page.unmount(&mut rt);
    assert!(rt.scene().is_empty());
}

#[test]
fn initializers_tolerate_missing_targets() {
    let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), false);
    let mut page = Page::mount(&mut rt);
    for label in [
        "essence-core-line-1",
        "about-manifesto",
        "ritual-image-product-1",
        "journal-card-2",
        "footer-divider",
        "hero-subheadline",
    ] {
        let id = element(&rt, label);
        rt.scene_mut().remove(id);
    }

    page.animate(&mut rt).unwrap();
    for y in [0.0, 1500.0, 3000.0, 6000.0] {
        page.scroll(&mut rt, y);
        run(&mut rt, &mut page, 400);
    }
    page.unmount(&mut rt);
}

#[test]
fn sections_reveal_as_they_scroll_into_view() {
    let (mut rt, mut page) = mounted(false);
    let line = element(&rt, "about-heading");
    assert_eq!(rt.scene().style(line).unwrap().opacity, 0.0);

    let about = element(&rt, "about");
    let top = rt.scene().rect(about).unwrap().top;
    page.scroll(&mut rt, top);
    run(&mut rt, &mut page, 4000);
    assert!(rt.scene().style(line).unwrap().is_revealed());
    assert_eq!(page.active_nav(&rt), NavItem::About);
}

#[test]
fn nav_click_scrolls_to_section() {
    let (mut rt, mut page) = mounted(false);
    let button = page.navbar().button(NavItem::Journal);
    assert_eq!(
        page.click(&mut rt, button).unwrap(),
        PageAction::Navigated(NavItem::Journal)
    );
    run(&mut rt, &mut page, 600);

    let journal = element(&rt, "journal");
    let top = rt.scene().rect(journal).unwrap().top;
    assert_eq!(rt.viewport().scroll_y, rt.viewport().clamp_scroll(top));
    assert_eq!(page.active_nav(&rt), NavItem::Journal);
}

#[test]
fn opening_overlay_freezes_a_smooth_scroll_in_flight() {
    let (mut rt, mut page) = mounted(false);
    let button = page.navbar().button(NavItem::Journal);
    page.click(&mut rt, button).unwrap();
    page.tick(&mut rt, 16.0);
    assert!(rt.is_scrolling());

    let cta = page.showcase().blocks()[0].cta();
    assert!(matches!(
        page.click(&mut rt, cta).unwrap(),
        PageAction::OverlayOpened(_)
    ));
    assert!(rt.scene().is_scroll_locked());
    let before = rt.viewport().scroll_y;

    run(&mut rt, &mut page, 640);
    assert_eq!(rt.viewport().scroll_y, before);
    let backdrop = page.overlay().backdrop().unwrap();
    assert_eq!(rt.scene().rect(backdrop).unwrap().top, before);
}

#[test]
fn active_nav_survives_jumps_past_whole_sections() {
    let (mut animated, mut animated_page) = mounted(false);
    let (mut reduced, mut reduced_page) = mounted(true);

    let products = element(&animated, "products");
    let products_top = animated.scene().rect(products).unwrap().top;
    let bottom = animated.viewport().document_height;

    for y in [products_top, bottom, 0.0, bottom, products_top] {
        animated_page.scroll(&mut animated, y);
        reduced_page.scroll(&mut reduced, y);
        assert_eq!(
            animated_page.active_nav(&animated),
            reduced_page.active_nav(&reduced),
            "scroll_y = {}",
            animated.viewport().scroll_y
        );
    }
}

#[test]
fn order_links_prefill_the_product_message() {
    let (mut rt, mut page) = mounted(true);
    let block = &page.showcase().blocks()[0];
    let (link, message) = (block.whatsapp(), block.product().order_message);

    let PageAction::OpenLink(url) = page.click(&mut rt, link).unwrap() else {
        panic!("expected a link");
    };
    let text = url.query_pairs().find(|(k, _)| k == "text").map(|(_, v)| v.into_owned());
    assert_eq!(text.as_deref(), Some(message));
}

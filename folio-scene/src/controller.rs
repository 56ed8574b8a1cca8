//! Page content and interaction wiring
//!
//! Runs once the document is ready: schedules the loading overlay, wires
//! the navigation, renders the skill and portfolio cards, hooks up the
//! filter buttons and contact form, and registers the scroll reveals.
//! Handlers live for the whole page and are leaked to JS.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, PerformanceNavigationTiming, Window,
};

use crate::content::{PageContent, PortfolioRecord, SkillRecord, random_tint};
use crate::filter::{Filter, GenerationCounter, StyleChange, Transition};
use crate::loading::LoadingTimeline;
use crate::log_debug;
use crate::markup::{portfolio_item_class, portfolio_item_html, skill_item_html};
use crate::nav::{MenuState, SectionOffset, active_section, link_is_active};
use crate::reveal::{
    ANIMATE_CLASS, ENTRANCE_SELECTOR, ENTRANCE_THRESHOLD, Intersection, SKILL_BAR_THRESHOLD,
    should_animate, skill_bar_width,
};

/// Delays used by the controller, in milliseconds
pub mod timing {
    pub use crate::filter::{HIDE_DELAY_MS, SHOW_DELAY_MS};
    pub use crate::loading::{FADE_DELAY_MS, FADE_DURATION_MS};
}

/// Id of the JSON block the generator embeds
pub const CONTENT_SCRIPT_ID: &str = "site-content";

/// Wire up the whole page
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let embedded = document
        .get_element_by_id(CONTENT_SCRIPT_ID)
        .and_then(|script| script.text_content());
    let content = PageContent::from_json_or_default(embedded.as_deref());

    schedule_loading_screen(&window, &document);
    wire_navigation(&window, &document)?;
    render_skills(&document, &content.skills)?;
    if render_portfolio(&document, &content.projects)? {
        wire_filters(&window, &document)?;
    }
    wire_contact_form(&window, &document, content.confirmation)?;
    observe_skill_bars(&document)?;
    observe_entrances(&document)?;

    Ok(())
}

/// All elements matching `selector`, in document order
fn elements(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

fn apply_style(element: &Element, change: StyleChange) {
    for (property, value) in change {
        set_style(element, property, value);
    }
}

fn set_timeout(window: &Window, delay_ms: u32, callback: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(callback);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    );
}

/// Milliseconds since `DOMContentLoaded` fired, or 0 when the browser has no
/// navigation timing entry.
fn ms_since_dom_content_loaded(window: &Window) -> f64 {
    let Some(performance) = window.performance() else {
        return 0.0;
    };
    let ready = performance
        .get_entries_by_type("navigation")
        .get(0)
        .dyn_into::<PerformanceNavigationTiming>()
        .map(|timing| timing.dom_content_loaded_event_start())
        .unwrap_or(0.0);
    if ready <= 0.0 {
        return 0.0;
    }
    (performance.now() - ready).max(0.0)
}

fn schedule_loading_screen(window: &Window, document: &Document) {
    let Some(screen) = document.query_selector(".loading-screen").ok().flatten() else {
        return;
    };
    let timeline = LoadingTimeline::default();
    let elapsed = ms_since_dom_content_loaded(window);
    let fade_in = timeline.remaining_fade_delay(elapsed);
    let hide_after_fade = timeline.remaining_hide_delay(elapsed).saturating_sub(fade_in);
    log_debug(&format!(
        "loading screen: {elapsed:.0} ms since ready, fading in {fade_in} ms"
    ));
    let later = window.clone();

    set_timeout(window, fade_in, move || {
        let _ = screen.class_list().add_1("fade-out");
        set_timeout(&later, hide_after_fade, move || {
            set_style(&screen, "display", "none");
        });
    });
}

fn wire_navigation(window: &Window, document: &Document) -> Result<(), JsValue> {
    let links = elements(document, ".nav-link");

    if let Some(menu) = document.query_selector(".nav-menu")? {
        let toggle = document.get_element_by_id("navToggle");
        let state = Rc::new(Cell::new(MenuState::default()));

        let sync = {
            let toggle = toggle.clone();
            move |open: bool| {
                if let Some(toggle) = &toggle {
                    let _ = toggle.class_list().toggle_with_force("active", open);
                }
                let _ = menu.class_list().toggle_with_force("active", open);
            }
        };
        let sync = Rc::new(sync);

        if let Some(toggle) = &toggle {
            let state = Rc::clone(&state);
            let sync = Rc::clone(&sync);
            let on_click = Closure::<dyn FnMut()>::new(move || {
                let mut menu = state.get();
                menu.toggle();
                state.set(menu);
                sync(menu.open);
            });
            toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        for link in &links {
            let state = Rc::clone(&state);
            let sync = Rc::clone(&sync);
            let on_click = Closure::<dyn FnMut()>::new(move || {
                let mut menu = state.get();
                if menu.link_clicked() {
                    state.set(menu);
                    sync(false);
                }
            });
            link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }
    }

    let scroll_window = window.clone();
    let scroll_document = document.clone();
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let sections: Vec<SectionOffset> = elements(&scroll_document, "section[id]")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| SectionOffset {
                id: el.id(),
                top: el.offset_top() as f64,
            })
            .collect();
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        let current = active_section(scroll_y, &sections);

        for link in &links {
            let active = link_is_active(link.get_attribute("href").as_deref(), current);
            let _ = link.class_list().toggle_with_force("active", active);
        }
    });
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    Ok(())
}

fn render_skills(document: &Document, skills: &[SkillRecord]) -> Result<(), JsValue> {
    let Some(container) = document.query_selector(".skills-container")? else {
        return Ok(());
    };

    for skill in skills {
        let item = document.create_element("div")?;
        item.set_class_name("skill-item");
        item.set_inner_html(&skill_item_html(skill));
        container.append_child(&item)?;
    }
    Ok(())
}

/// Returns false when the page has no portfolio grid
fn render_portfolio(document: &Document, projects: &[PortfolioRecord]) -> Result<bool, JsValue> {
    let Some(grid) = document.query_selector(".portfolio-grid")? else {
        return Ok(false);
    };

    let mut rng = crate::browser_rng();
    for project in projects {
        let item = document.create_element("div")?;
        item.set_class_name(&portfolio_item_class(project));
        item.set_inner_html(&portfolio_item_html(project, random_tint(&mut rng)));
        grid.append_child(&item)?;
    }
    Ok(true)
}

fn wire_filters(window: &Window, document: &Document) -> Result<(), JsValue> {
    let buttons = Rc::new(elements(document, ".filter-btn"));
    let generations = Rc::new(GenerationCounter::default());

    for button in buttons.iter() {
        let buttons = Rc::clone(&buttons);
        let generations = Rc::clone(&generations);
        let window = window.clone();
        let document = document.clone();
        let clicked = button.clone();

        let on_click = Closure::<dyn FnMut()>::new(move || {
            for other in buttons.iter() {
                let _ = other.class_list().remove_1("active");
            }
            let _ = clicked.class_list().add_1("active");

            let value = clicked.get_attribute("data-filter").unwrap_or_default();
            apply_filter(&window, &document, &Filter::parse(&value), &generations);
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn apply_filter(
    window: &Window,
    document: &Document,
    filter: &Filter,
    generations: &Rc<GenerationCounter>,
) {
    let generation = generations.advance();

    for item in elements(document, ".portfolio-item") {
        let transition = Transition::for_item(filter, &item.class_name());
        apply_style(&item, transition.immediate());

        let (delay, change) = transition.deferred();
        let generations = Rc::clone(generations);
        set_timeout(window, delay, move || {
            if generations.is_current(generation) {
                apply_style(&item, change);
            }
        });
    }
}

fn wire_contact_form(
    window: &Window,
    document: &Document,
    confirmation: String,
) -> Result<(), JsValue> {
    let Some(form) = document
        .query_selector(".contact-form")?
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };

    let window = window.clone();
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let _ = window.alert_with_message(&confirmation);
        target.reset();
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

fn intersection(entry: &IntersectionObserverEntry) -> Intersection {
    Intersection {
        is_intersecting: entry.is_intersecting(),
        ratio: entry.intersection_ratio(),
    }
}

/// Observer whose callback sees each entry that crossed into view
fn observer(
    threshold: f64,
    mut on_entry: impl FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(entry, &observer);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

fn observe_skill_bars(document: &Document) -> Result<(), JsValue> {
    let observer = observer(SKILL_BAR_THRESHOLD, |entry, observer| {
        if !intersection(&entry).crosses(SKILL_BAR_THRESHOLD) {
            return;
        }
        let row = entry.target();
        if let Some(bar) = row.query_selector(".skill-progress").ok().flatten() {
            if let Some(width) = bar
                .get_attribute("data-percentage")
                .as_deref()
                .and_then(skill_bar_width)
            {
                set_style(&bar, "width", &width);
            }
        }
        observer.unobserve(&row);
    })?;

    for row in elements(document, ".skill-item") {
        observer.observe(&row);
    }
    Ok(())
}

fn observe_entrances(document: &Document) -> Result<(), JsValue> {
    let observer = observer(ENTRANCE_THRESHOLD, |entry, _| {
        if should_animate(intersection(&entry)) {
            let _ = entry.target().class_list().add_1(ANIMATE_CLASS);
        }
    })?;

    for element in elements(document, ENTRANCE_SELECTOR) {
        observer.observe(&element);
    }
    Ok(())
}

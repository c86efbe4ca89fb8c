use crate::content::{PortfolioContent, Project, PORTFOLIO};
use crate::render::{render_page, ItemView, RegionLayout, SectionView};
use crate::typewriter::{Typewriter, TYPEWRITER_STEP_MS};
use crate::viewport::{
    Observer, RegionId, ScrollState, ScrollTracker, VisibilityMap, VisibilityTracker,
    VisibilityUpdate, VISIBILITY_THRESHOLD,
};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Date, Function, Object, Reflect, JSON};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::{Rc, Weak},
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    console, window, Element, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};
use yew::prelude::*;

#[derive(Default, PartialEq)]
struct VisibilityState {
    map: VisibilityMap,
}

impl Reducible for VisibilityState {
    type Action = VisibilityUpdate;

    fn reduce(self: Rc<Self>, update: Self::Action) -> Rc<Self> {
        let unchanged = self.map.contains(update.region)
            && self.map.is_visible(update.region) == update.visible;
        if unchanged {
            return self;
        }

        let mut map = self.map.clone();
        map.apply(update);
        Rc::new(Self { map })
    }
}

#[derive(Clone, PartialEq)]
struct RegionRefs {
    hero: NodeRef,
    about: NodeRef,
    skills: NodeRef,
    projects: NodeRef,
    contact: NodeRef,
}

impl RegionRefs {
    fn get(&self, region: RegionId) -> &NodeRef {
        match region {
            RegionId::Hero => &self.hero,
            RegionId::About => &self.about,
            RegionId::Skills => &self.skills,
            RegionId::Projects => &self.projects,
            RegionId::Contact => &self.contact,
        }
    }

    fn elements(&self) -> HashMap<RegionId, Element> {
        RegionId::ALL
            .into_iter()
            .filter_map(|region| Some((region, self.get(region).cast::<Element>()?)))
            .collect()
    }

    fn measure(&self) -> RegionLayout {
        let mut layout = RegionLayout::default();
        for region in RegionId::ALL {
            if let Some(element) = self.get(region).cast::<HtmlElement>() {
                layout.set_top(region, f64::from(element.offset_top()));
            }
        }
        layout
    }

    fn scroll_into_view(&self, region: RegionId) {
        if let Some(element) = self.get(region).cast::<Element>() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

struct DomObserver {
    inner: IntersectionObserver,
    targets: HashMap<RegionId, Element>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl DomObserver {
    fn new(
        targets: HashMap<RegionId, Element>,
        on_report: impl Fn(RegionId, f64) + 'static,
    ) -> Option<Self> {
        let win = window()?;
        let supported =
            Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !supported {
            return None;
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if let Some(region) = RegionId::from_str(&entry.target().id()) {
                        on_report(region, entry.intersection_ratio());
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let inner = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .ok()?;

        Some(Self {
            inner,
            targets,
            _callback: callback,
        })
    }
}

impl Observer for DomObserver {
    fn observe(&mut self, region: RegionId) -> bool {
        let Some(element) = self.targets.get(&region) else {
            return false;
        };
        self.inner.observe(element);
        true
    }

    fn unobserve(&mut self, region: RegionId) {
        if let Some(element) = self.targets.get(&region) {
            self.inner.unobserve(element);
        }
    }
}

impl Drop for DomObserver {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}

type DomVisibilityTracker = RefCell<VisibilityTracker<DomObserver>>;

fn start_visibility_tracking(
    refs: &RegionRefs,
    dispatcher: UseReducerDispatcher<VisibilityState>,
) -> Rc<DomVisibilityTracker> {
    let targets = refs.elements();
    let tracker = Rc::new_cyclic(|weak: &Weak<DomVisibilityTracker>| {
        let weak = weak.clone();
        let report_dispatcher = dispatcher.clone();
        let observer = DomObserver::new(targets, move |region, ratio| {
            let Some(tracker) = weak.upgrade() else {
                return;
            };
            let update = tracker.borrow().record(region, ratio);
            if let Some(update) = update {
                report_dispatcher.dispatch(update);
            }
        });
        RefCell::new(VisibilityTracker::new(observer))
    });

    if !tracker.borrow().is_available() {
        console::warn_1(&JsValue::from_str(
            "IntersectionObserver unavailable; showing every section",
        ));
    }

    for region in RegionId::ALL {
        let update = tracker.borrow_mut().register(region);
        if let Some(update) = update {
            dispatcher.dispatch(update);
        }
    }

    tracker
}

struct ScrollSubscription {
    window: Window,
    callback: Closure<dyn Fn()>,
}

impl ScrollSubscription {
    fn attach(on_scroll: impl Fn(f64) + 'static) -> Option<Self> {
        let win = window()?;
        let reader = win.clone();
        let callback = Closure::<dyn Fn()>::new(move || {
            if let Ok(offset) = reader.scroll_y() {
                on_scroll(offset);
            }
        });

        win.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            window: win,
            callback,
        })
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
    }
}

fn current_scroll_offset() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    name: AttrValue,
    on_navigate: Callback<RegionId>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let nav_item = |region: RegionId, label: &'static str| {
        let on_navigate = props.on_navigate.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_navigate.emit(region));
        html! {
            <li>
                <button type="button" class="nav-link" onclick={onclick}>{label}</button>
            </li>
        }
    };

    html! {
        <header class="fixed top-0 left-0 right-0 z-40 bg-[#0d1117] bg-opacity-70 backdrop-blur-md">
            <nav class="container mx-auto px-4 py-4 flex justify-between items-center">
                <div class="text-xl font-bold text-[#3a86ff]">{props.name.clone()}</div>
                <ul class="hidden md:flex space-x-6">
                    {nav_item(RegionId::About, "About")}
                    {nav_item(RegionId::Skills, "Skills")}
                    {nav_item(RegionId::Projects, "Projects")}
                    {nav_item(RegionId::Contact, "Contact")}
                </ul>
            </nav>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct TypedTaglineProps {
    text: &'static str,
}

#[function_component(TypedTagline)]
fn typed_tagline(props: &TypedTaglineProps) -> Html {
    let writer = use_state(|| Typewriter::new(props.text));

    {
        let handle = writer.clone();
        use_effect_with(*writer, move |current| {
            let pending = (!current.is_complete()).then(|| {
                let next = current.advanced();
                Timeout::new(TYPEWRITER_STEP_MS, move || handle.set(next))
            });
            move || drop(pending)
        });
    }

    html! {
        <p class="text-xl sm:text-2xl lg:text-3xl font-light mb-8 h-8">{writer.typed()}</p>
    }
}

#[derive(Properties, PartialEq)]
struct ParallaxSectionProps {
    view: SectionView,
    title: AttrValue,
    node_ref: NodeRef,
    #[prop_or_default]
    class: Classes,
    background: AttrValue,
    #[prop_or_default]
    children: Html,
}

#[function_component(ParallaxSection)]
fn parallax_section(props: &ParallaxSectionProps) -> Html {
    let view = &props.view;

    html! {
        <section
            ref={props.node_ref.clone()}
            id={view.region.as_str()}
            class={classes!(
                "relative",
                "py-20",
                "px-4",
                "overflow-hidden",
                "transition-opacity",
                "duration-1000",
                "transform",
                props.class.clone(),
                view.transition_class(),
            )}
        >
            <div class="absolute inset-0 z-0 parallax-bg" style={view.background_style()}>
                <div class={classes!("absolute", "inset-0", props.background.to_string())}></div>
            </div>
            <div class="relative z-10 container mx-auto max-w-6xl">
                <div class="relative overflow-hidden inline-block mx-auto mb-12">
                    <h2 class={classes!("text-3xl", "font-bold", "text-center", "text-[#3a86ff]", view.heading_class())}>
                        {props.title.clone()}
                    </h2>
                    <div class={view.mask_class()}></div>
                </div>
                {props.children.clone()}
            </div>
        </section>
    }
}

fn item_style(item: &ItemView) -> Option<String> {
    (!item.style.is_empty()).then(|| item.style.clone())
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let image_failed = use_state(|| false);
    let onerror = {
        let image_failed = image_failed.clone();
        Callback::from(move |_: Event| image_failed.set(true))
    };

    html! {
        <div class="bg-[#1a202c] rounded-lg shadow-md overflow-hidden transition-all duration-500 transform hover:scale-105 hover:shadow-2xl">
            if let Some(src) = project.image_src(*image_failed) {
                <img src={src} alt={project.title} class="w-full h-48 object-cover" onerror={onerror} />
            }
            <div class="w-full p-6">
                <h3 class="text-xl font-bold mb-2 text-[#3a86ff]">
                    <a href={project.link}>{project.title}</a>
                </h3>
                <p class="text-[#e6e6e6] text-sm mb-4">{project.description}</p>
                <div class="flex flex-wrap gap-2 mb-4">
                    { for project.tech.iter().map(|tech| html! {
                        <span class="text-xs font-semibold px-2 py-1 rounded-full bg-[#0d1117] text-[#e6e6e6]">{*tech}</span>
                    }) }
                </div>
                <a class="view-project" href={project.link}>{"View Project"}</a>
            </div>
        </div>
    }
}

struct LottieAnimation {
    handle: Rc<RefCell<Option<JsValue>>>,
    cancelled: Rc<Cell<bool>>,
}

impl LottieAnimation {
    fn start(container: Element, animation_url: &'static str) -> Option<Self> {
        let lottie = lottie_global()?;
        let handle = Rc::new(RefCell::new(None));
        let cancelled = Rc::new(Cell::new(false));

        {
            let handle = handle.clone();
            let cancelled = cancelled.clone();
            spawn_local(async move {
                let Some(animation_data) = fetch_animation_data(animation_url).await else {
                    return;
                };
                if cancelled.get() {
                    return;
                }
                if let Some(animation) = load_animation(&lottie, &container, &animation_data) {
                    *handle.borrow_mut() = Some(animation);
                }
            });
        }

        Some(Self { handle, cancelled })
    }
}

impl Drop for LottieAnimation {
    fn drop(&mut self) {
        self.cancelled.set(true);
        if let Some(animation) = self.handle.borrow_mut().take() {
            call_method(&animation, "destroy", None);
        }
    }
}

fn lottie_global() -> Option<JsValue> {
    let win = window()?;
    let lottie = Reflect::get(&win, &JsValue::from_str("lottie")).ok()?;
    (!lottie.is_undefined() && !lottie.is_null()).then_some(lottie)
}

async fn fetch_animation_data(url: &str) -> Option<JsValue> {
    let response = Request::get(url).send().await.ok()?;
    if !response.ok() {
        return None;
    }
    let body = response.text().await.ok()?;
    JSON::parse(&body).ok()
}

fn load_animation(
    lottie: &JsValue,
    container: &Element,
    animation_data: &JsValue,
) -> Option<JsValue> {
    let options = Object::new();
    let entries: [(&str, JsValue); 5] = [
        ("container", JsValue::from(container.clone())),
        ("renderer", JsValue::from_str("svg")),
        ("loop", JsValue::FALSE),
        ("autoplay", JsValue::TRUE),
        ("animationData", animation_data.clone()),
    ];
    for (key, value) in entries {
        Reflect::set(&options, &JsValue::from_str(key), &value).ok()?;
    }

    call_method(lottie, "loadAnimation", Some(&JsValue::from(options)))
}

fn call_method(target: &JsValue, name: &str, argument: Option<&JsValue>) -> Option<JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name)).ok()?;
    let method = method.dyn_ref::<Function>()?;
    match argument {
        Some(argument) => method.call1(target, argument).ok(),
        None => method.call0(target).ok(),
    }
}

#[derive(Properties, PartialEq)]
struct LottieRocketProps {
    active: bool,
    animation_url: &'static str,
}

#[function_component(LottieRocket)]
fn lottie_rocket(props: &LottieRocketProps) -> Html {
    let container = use_node_ref();

    {
        let container = container.clone();
        let animation_url = props.animation_url;
        use_effect_with(props.active, move |active| {
            let animation = active
                .then(|| container.cast::<Element>())
                .flatten()
                .and_then(|element| LottieAnimation::start(element, animation_url));
            move || drop(animation)
        });
    }

    html! {
        <div class={classes!(
            "relative", "flex", "justify-center", "items-center", "h-[200px]", "my-12",
            "transition-opacity", "duration-1000",
            if props.active { "opacity-100" } else { "opacity-0" },
        )}>
            <div ref={container} class="w-full h-full max-w-sm" />
        </div>
    }
}

fn contact_form_submit() -> Callback<SubmitEvent> {
    Callback::from(|event: SubmitEvent| {
        event.prevent_default();
        if let Some(form) = event.target_dyn_into::<HtmlFormElement>() {
            form.reset();
        }
    })
}

#[derive(Properties, PartialEq)]
struct FooterProps {
    content: &'static PortfolioContent,
}

#[function_component(Footer)]
fn footer(props: &FooterProps) -> Html {
    let year = Date::new_0().get_full_year();

    html! {
        <footer class="bg-[#0d1117] text-[#e6e6e6] py-4 px-4 text-center border-t border-[#00f5d4]">
            <div class="container mx-auto">
                <ul class="flex justify-center space-x-6 mb-4">
                    { for props.content.socials.iter().map(|social| html! {
                        <li>
                            <a class="social-link" href={social.href} target="_blank" rel="noopener noreferrer">
                                {social.label}
                                <span class="sr-only">{" (opens in a new tab)"}</span>
                            </a>
                        </li>
                    }) }
                </ul>
                <p class="text-sm">{format!("© {year} {}. All rights reserved.", props.content.name)}</p>
            </div>
        </footer>
    }
}

#[function_component(App)]
fn app() -> Html {
    let content: &'static PortfolioContent = &PORTFOLIO;
    let visibility = use_reducer(VisibilityState::default);
    let scroll = use_state(ScrollState::default);
    let refs = RegionRefs {
        hero: use_node_ref(),
        about: use_node_ref(),
        skills: use_node_ref(),
        projects: use_node_ref(),
        contact: use_node_ref(),
    };

    {
        let refs = refs.clone();
        let dispatcher = visibility.dispatcher();
        use_effect_with((), move |_| {
            let tracker = start_visibility_tracking(&refs, dispatcher);
            move || tracker.borrow_mut().teardown()
        });
    }

    {
        let scroll = scroll.clone();
        use_effect_with((), move |_| {
            let tracker = Rc::new(RefCell::new(ScrollTracker::mount(current_scroll_offset())));
            scroll.set(tracker.borrow().state());

            let subscription = {
                let tracker = tracker.clone();
                ScrollSubscription::attach(move |offset| {
                    let state = tracker.borrow_mut().record(offset);
                    if let Some(state) = state {
                        scroll.set(state);
                    }
                })
            };

            move || {
                tracker.borrow_mut().teardown();
                drop(subscription);
            }
        });
    }

    let on_navigate = {
        let refs = refs.clone();
        Callback::from(move |region: RegionId| refs.scroll_into_view(region))
    };

    let view_projects = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(RegionId::Projects))
    };

    let page = render_page(content, &visibility.map, *scroll, &refs.measure());

    html! {
        <div class="font-sans bg-[#0d1117] min-h-screen text-[#e6e6e6] antialiased">
            <Header name={content.name} on_navigate={on_navigate} />

            <section
                ref={refs.hero.clone()}
                id={RegionId::Hero.as_str()}
                class={classes!(
                    "h-screen", "relative", "flex", "flex-col", "justify-center", "items-center",
                    "text-center", "transition-opacity", "duration-1000",
                    page.hero.transition_class(),
                )}
            >
                <div class="absolute inset-0 z-0 overflow-hidden">
                    <div class="hero-backdrop animate-pulse" style={page.hero_backdrop_style.clone()}></div>
                </div>
                <div class="relative z-10 p-6 max-w-4xl mx-auto">
                    <h1 class="text-4xl sm:text-5xl lg:text-7xl font-extrabold tracking-tight mb-4 animate-fade-in-up">
                        {"Hi, I'm "}<span class="text-[#3a86ff]">{content.name}</span>
                    </h1>
                    <TypedTagline text={content.tagline} />
                    <div class="flex justify-center space-x-4 animate-fade-in-up-delay">
                        <button type="button" class="cta-button" onclick={view_projects}>
                            {"View My Work"}
                        </button>
                    </div>
                </div>
            </section>

            <ParallaxSection
                view={page.about.clone()}
                title="About Me"
                node_ref={refs.about.clone()}
                background="bg-gradient-to-br from-[#0d1117] via-[#161b22] to-[#0d1117] opacity-60"
            >
                <div class="relative z-20 text-center text-lg max-w-3xl mx-auto leading-relaxed">
                    { for content.about.iter().zip(&page.about_paragraphs).map(|(paragraph, item)| html! {
                        <p class={classes!("mb-6", item.class.clone())}>{*paragraph}</p>
                    }) }
                </div>
            </ParallaxSection>

            <ParallaxSection
                view={page.skills.clone()}
                title="Skills"
                node_ref={refs.skills.clone()}
                background="bg-gradient-to-tl from-[#0d1117] via-[#1a202c] to-[#0d1117] opacity-50"
            >
                <div class="relative z-20 grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-6">
                    { for content.skills.iter().zip(&page.skill_cards).map(|(skill, item)| html! {
                        <div class={classes!("skill-card", item.class.clone())} style={item_style(item)}>
                            <span class="text-4xl mb-2 block">{skill.icon}</span>
                            <p class="text-lg font-semibold text-[#e6e6e6]">{skill.name}</p>
                        </div>
                    }) }
                </div>
            </ParallaxSection>

            <ParallaxSection
                view={page.projects.clone()}
                title="My Work"
                node_ref={refs.projects.clone()}
                class={classes!("pb-0")}
                background="bg-gradient-to-tr from-[#0d1117] via-[#161b22] to-[#0d1117] opacity-40"
            >
                <div class="relative z-20 grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                    { for content.projects.iter().zip(&page.project_cards).map(|(project, item)| html! {
                        <div class={item.class.clone()} style={item_style(item)}>
                            <ProjectCard project={*project} />
                        </div>
                    }) }
                </div>
            </ParallaxSection>

            <ParallaxSection
                view={page.contact.clone()}
                title="Get In Touch"
                node_ref={refs.contact.clone()}
                background="bg-gradient-to-bl from-[#0d1117] via-[#1a202c] to-[#0d1117] opacity-30"
            >
                <div class="relative z-20 max-w-xl mx-auto text-center">
                    <p class={classes!("text-lg", "mb-8", page.contact_blurb.class.clone())}>
                        {content.contact_blurb}
                    </p>
                    <a class="cta-button" href={content.mailto()}>{"Email Me"}</a>
                    <form
                        class={classes!("mt-8", "flex", "justify-center", page.contact_form.class.clone())}
                        onsubmit={contact_form_submit()}
                    >
                        <input type="email" placeholder="Enter your email" class="contact-input" />
                        <button type="submit" class="contact-submit">{"Send"}</button>
                    </form>
                    <div class={classes!("mt-8", "flex", "justify-center", page.resume_link.class.clone())}>
                        <a class="resume-link" href={content.resume.path} download={content.resume.download_name}>
                            {"Download Resume"}
                        </a>
                    </div>
                    <LottieRocket
                        active={page.contact.reveal.is_revealed()}
                        animation_url={content.animation_url}
                    />
                </div>
            </ParallaxSection>

            <Footer content={content} />
        </div>
    }
}

pub fn run() {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        console::error_1(&JsValue::from_str("missing #app mount point"));
        return;
    };

    yew::Renderer::<App>::with_root(root).render();
}

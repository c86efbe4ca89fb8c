use crate::content::PortfolioContent;
use crate::viewport::{parallax_offset, RegionId, ScrollState, VisibilityMap};
use std::collections::BTreeMap;

const SKILL_STAGGER_SECONDS: f64 = 0.05;
const PROJECT_STAGGER_SECONDS: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    Revealed,
    Hidden,
}

impl Reveal {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Revealed
        } else {
            Self::Hidden
        }
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    fn pick(self, revealed: &'static str, hidden: &'static str) -> &'static str {
        match self {
            Self::Revealed => revealed,
            Self::Hidden => hidden,
        }
    }
}

/// Measured document offsets. Regions not yet attached to the DOM are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionLayout {
    tops: BTreeMap<RegionId, f64>,
}

impl RegionLayout {
    pub fn set_top(&mut self, region: RegionId, top_offset: f64) {
        self.tops.insert(region, top_offset);
    }

    pub fn top_offset(&self, region: RegionId) -> Option<f64> {
        self.tops.get(&region).copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionView {
    pub region: RegionId,
    pub reveal: Reveal,
    pub parallax_offset: f64,
}

impl SectionView {
    fn new(
        region: RegionId,
        visibility: &VisibilityMap,
        scroll: ScrollState,
        layout: &RegionLayout,
    ) -> Self {
        let parallax_offset = layout
            .top_offset(region)
            .map(|top| parallax_offset(scroll, top, region.parallax_factor()))
            .unwrap_or(0.0);

        Self {
            region,
            reveal: Reveal::from_visible(visibility.is_visible(region)),
            parallax_offset,
        }
    }

    pub fn transition_class(&self) -> &'static str {
        match self.region {
            RegionId::Hero => self.reveal.pick("opacity-100", "opacity-0"),
            _ => self
                .reveal
                .pick("opacity-100 translate-y-0", "opacity-0 translate-y-10"),
        }
    }

    pub fn background_style(&self) -> String {
        format!("transform: translateY({:.2}px);", self.parallax_offset)
    }

    pub fn heading_class(&self) -> &'static str {
        let entrance = match self.region {
            RegionId::About | RegionId::Projects => "animate-slideInLeft",
            RegionId::Skills | RegionId::Contact => "animate-slideInRight",
            RegionId::Hero => "",
        };
        self.reveal.pick(entrance, "")
    }

    pub fn mask_class(&self) -> &'static str {
        self.reveal.pick("reveal-mask transform scale-x-0", "reveal-mask")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemView {
    pub class: String,
    pub style: String,
}

impl ItemView {
    fn class_only(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            style: String::new(),
        }
    }

    fn staggered(class: &str, index: usize, step_seconds: f64) -> Self {
        Self {
            class: class.to_string(),
            style: format!("animation-delay: {:.2}s;", index as f64 * step_seconds),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub hero: SectionView,
    pub hero_backdrop_style: String,
    pub about: SectionView,
    pub about_paragraphs: Vec<ItemView>,
    pub skills: SectionView,
    pub skill_cards: Vec<ItemView>,
    pub projects: SectionView,
    pub project_cards: Vec<ItemView>,
    pub contact: SectionView,
    pub contact_blurb: ItemView,
    pub contact_form: ItemView,
    pub resume_link: ItemView,
}

#[cfg(test)]
impl PageView {
    fn section(&self, region: RegionId) -> &SectionView {
        match region {
            RegionId::Hero => &self.hero,
            RegionId::About => &self.about,
            RegionId::Skills => &self.skills,
            RegionId::Projects => &self.projects,
            RegionId::Contact => &self.contact,
        }
    }
}

pub fn render_page(
    content: &PortfolioContent,
    visibility: &VisibilityMap,
    scroll: ScrollState,
    layout: &RegionLayout,
) -> PageView {
    let section = |region| SectionView::new(region, visibility, scroll, layout);
    let hero = section(RegionId::Hero);
    let about = section(RegionId::About);
    let skills = section(RegionId::Skills);
    let projects = section(RegionId::Projects);
    let contact = section(RegionId::Contact);

    let hero_backdrop_style = format!(
        "transform: translate(-50%, calc(-50% - {:.2}px));",
        hero.parallax_offset
    );

    let about_paragraphs = (0..content.about.len())
        .map(|index| match about.reveal {
            Reveal::Revealed => ItemView::class_only(format!(
                "animate-fadeInUp animate-stagger-{}",
                index + 1
            )),
            Reveal::Hidden => ItemView::class_only(""),
        })
        .collect();

    let skill_class = skills.reveal.pick("animate-scaleIn", "opacity-0 scale-75");
    let skill_cards = (0..content.skills.len())
        .map(|index| ItemView::staggered(skill_class, index, SKILL_STAGGER_SECONDS))
        .collect();

    let project_class = projects.reveal.pick("animate-fadeInUp", "opacity-0");
    let project_cards = (0..content.projects.len())
        .map(|index| ItemView::staggered(project_class, index, PROJECT_STAGGER_SECONDS))
        .collect();

    let contact_item = |revealed| ItemView::class_only(contact.reveal.pick(revealed, ""));
    let contact_blurb = contact_item("animate-fadeInUp animate-stagger-1");
    let contact_form = contact_item("animate-scaleIn animate-stagger-2");
    let resume_link = contact_item("animate-fadeInUp animate-stagger-3");

    PageView {
        hero,
        hero_backdrop_style,
        about,
        about_paragraphs,
        skills,
        skill_cards,
        projects,
        project_cards,
        contact,
        contact_blurb,
        contact_form,
        resume_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PORTFOLIO;
    use crate::viewport::VisibilityUpdate;

    fn visible(regions: &[RegionId]) -> VisibilityMap {
        let mut map = VisibilityMap::default();
        for region in regions {
            map.apply(VisibilityUpdate {
                region: *region,
                visible: true,
            });
        }
        map
    }

    fn full_layout() -> RegionLayout {
        let mut layout = RegionLayout::default();
        for (index, region) in RegionId::ALL.into_iter().enumerate() {
            layout.set_top(region, index as f64 * 900.0);
        }
        layout
    }

    #[test]
    fn nothing_observed_renders_every_section_hidden() {
        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::default(),
            &full_layout(),
        );

        for region in RegionId::ALL {
            assert_eq!(page.section(region).reveal, Reveal::Hidden);
        }
        assert_eq!(page.hero.transition_class(), "opacity-0");
        assert_eq!(page.about.transition_class(), "opacity-0 translate-y-10");
        assert_eq!(page.about.heading_class(), "");
        assert_eq!(page.about.mask_class(), "reveal-mask");
        assert!(page.about_paragraphs.iter().all(|item| item.class.is_empty()));
        assert!(page.skill_cards.iter().all(|item| item.class == "opacity-0 scale-75"));
        assert!(page.project_cards.iter().all(|item| item.class == "opacity-0"));
    }

    #[test]
    fn visible_section_selects_revealed_styles() {
        let page = render_page(
            &PORTFOLIO,
            &visible(&[RegionId::About, RegionId::Skills]),
            ScrollState::default(),
            &full_layout(),
        );

        assert_eq!(page.about.transition_class(), "opacity-100 translate-y-0");
        assert_eq!(page.about.heading_class(), "animate-slideInLeft");
        assert_eq!(page.skills.heading_class(), "animate-slideInRight");
        assert_eq!(page.about.mask_class(), "reveal-mask transform scale-x-0");
        assert_eq!(page.projects.reveal, Reveal::Hidden);
        assert_eq!(page.about_paragraphs[0].class, "animate-fadeInUp animate-stagger-1");
        assert_eq!(
            page.about_paragraphs[PORTFOLIO.about.len() - 1].class,
            format!("animate-fadeInUp animate-stagger-{}", PORTFOLIO.about.len())
        );
    }

    #[test]
    fn item_counts_follow_content() {
        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::default(),
            &RegionLayout::default(),
        );

        assert_eq!(page.about_paragraphs.len(), PORTFOLIO.about.len());
        assert_eq!(page.skill_cards.len(), PORTFOLIO.skills.len());
        assert_eq!(page.project_cards.len(), PORTFOLIO.projects.len());
    }

    #[test]
    fn cards_are_staggered_by_index() {
        let page = render_page(
            &PORTFOLIO,
            &visible(&[RegionId::Skills, RegionId::Projects]),
            ScrollState::default(),
            &full_layout(),
        );

        assert_eq!(page.skill_cards[0].style, "animation-delay: 0.00s;");
        assert_eq!(page.skill_cards[4].style, "animation-delay: 0.20s;");
        assert_eq!(page.project_cards[2].style, "animation-delay: 0.30s;");
        assert_eq!(page.skill_cards[4].class, "animate-scaleIn");
        assert_eq!(page.project_cards[2].class, "animate-fadeInUp");
    }

    #[test]
    fn parallax_uses_per_region_factor_and_measured_top() {
        let mut layout = RegionLayout::default();
        layout.set_top(RegionId::About, 300.0);
        layout.set_top(RegionId::Contact, 3_000.0);

        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::new(500.0),
            &layout,
        );

        assert!((page.about.parallax_offset - 20.0).abs() < 1e-9);
        assert!((page.contact.parallax_offset + 125.0).abs() < 1e-9);
        assert_eq!(page.about.background_style(), "transform: translateY(20.00px);");
        assert_eq!(page.contact.background_style(), "transform: translateY(-125.00px);");
    }

    #[test]
    fn unmeasured_region_has_no_parallax() {
        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::new(1_200.0),
            &RegionLayout::default(),
        );

        assert_eq!(page.skills.parallax_offset, 0.0);
    }

    #[test]
    fn hero_backdrop_drifts_with_hero_parallax() {
        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::new(250.0),
            &full_layout(),
        );

        assert!((page.hero.parallax_offset - 50.0).abs() < 1e-9);
        assert_eq!(
            page.hero_backdrop_style,
            "transform: translate(-50%, calc(-50% - 50.00px));"
        );
    }

    #[test]
    fn unmeasured_hero_backdrop_stays_centered() {
        let page = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::new(250.0),
            &RegionLayout::default(),
        );

        assert_eq!(
            page.hero_backdrop_style,
            "transform: translate(-50%, calc(-50% - 0.00px));"
        );
    }

    #[test]
    fn visible_hero_and_contact_are_revealed() {
        let page = render_page(
            &PORTFOLIO,
            &visible(&[RegionId::Hero, RegionId::Contact]),
            ScrollState::default(),
            &full_layout(),
        );

        assert_eq!(page.hero.transition_class(), "opacity-100");
        assert_eq!(page.hero.heading_class(), "");
        assert!(page.contact.reveal.is_revealed());
        assert_eq!(page.contact.transition_class(), "opacity-100 translate-y-0");
        assert!(!page.about.reveal.is_revealed());
    }

    #[test]
    fn contact_parts_reveal_together() {
        let hidden = render_page(
            &PORTFOLIO,
            &VisibilityMap::default(),
            ScrollState::default(),
            &RegionLayout::default(),
        );
        let shown = render_page(
            &PORTFOLIO,
            &visible(&[RegionId::Contact]),
            ScrollState::default(),
            &RegionLayout::default(),
        );

        assert!(hidden.contact_form.class.is_empty());
        assert_eq!(shown.contact_blurb.class, "animate-fadeInUp animate-stagger-1");
        assert_eq!(shown.contact_form.class, "animate-scaleIn animate-stagger-2");
        assert_eq!(shown.resume_link.class, "animate-fadeInUp animate-stagger-3");
    }

    #[test]
    fn render_is_deterministic() {
        let visibility = visible(&[RegionId::Hero, RegionId::Projects]);
        let scroll = ScrollState::new(742.0);
        let layout = full_layout();

        assert_eq!(
            render_page(&PORTFOLIO, &visibility, scroll, &layout),
            render_page(&PORTFOLIO, &visibility, scroll, &layout)
        );
    }
}

//! Ritual showcase ("Begin Your Ritual")
//!
//! A header, one block per product and a closing line. Each block reveals
//! its image, then cascades its text column, then staggers its ingredient
//! rows. On desktop viewports the product image lifts on hover and drifts
//! upward with scroll.

use super::{settle, Column, Section};
use crate::content::{products, Product};
use crate::error::{Result, SiteError};
use ruhora_animation::{
    DurationPreset, EasePreset, Edge, MotionRuntime, Position, Props, Scope, ScrollDefaults,
    ScrollTrigger, Scrub, Stagger, Teardown, Timeline, TimelineStep, TriggerPoint, TweenSpec,
};
use ruhora_core::events::event_types;
use ruhora_core::{ElementId, MediaQuery, Scene};
use smallvec::SmallVec;

pub const TITLE: &str = "Begin Your Ritual";
pub const SUBTITLE: &str = "Two foundational rituals, each a quiet invitation to deeper care";
pub const CLOSING: &str = "Every ritual begins with intention.";
pub const FINAL_CTA: &str = "Explore the Collection";
pub const WHATSAPP_LABEL: &str = "Know More on Whatsapp";

const BLOCK_HEIGHT: f32 = 760.0;
const IMAGE_HEIGHT: f32 = 640.0;
const HOVER_SCALE: f32 = 1.015;
const PARALLAX_PX: f32 = -12.0;

fn reveal_step(targets: impl IntoIterator<Item = ElementId>, offset: f32) -> TimelineStep {
    TimelineStep::from_to(targets, Props::concealed(offset), Props::revealed())
}

/// One product's block in the showcase
pub struct ProductBlock {
    product: &'static Product,
    root: ElementId,
    image_wrapper: ElementId,
    image: ElementId,
    eyebrow: ElementId,
    name: ElementId,
    description: ElementId,
    ingredients: ElementId,
    ingredient_rows: SmallVec<[ElementId; 4]>,
    traits: ElementId,
    cta_wrapper: ElementId,
    cta: ElementId,
    whatsapp: ElementId,
}

impl ProductBlock {
    fn mount(column: &mut Column<'_>, product: &'static Product) -> Self {
        let id = product.id;
        let parent = column.root();
        let top = column.cursor();

        let root = column.open(parent, format!("ritual-block-{id}"), BLOCK_HEIGHT);
        let image_wrapper = column.open(root, format!("ritual-image-wrapper-{id}"), IMAGE_HEIGHT);
        let image = column.open(image_wrapper, format!("ritual-image-{id}"), IMAGE_HEIGHT);

        column.skip(80.0);
        let eyebrow = column.push_under(root, format!("ritual-eyebrow-{id}"), 20.0);
        let name = column.push_under(root, format!("ritual-name-{id}"), 48.0);
        let description = column.push_under(root, format!("ritual-description-{id}"), 96.0);

        let rows_height = product.ingredients.len() as f32 * 64.0 - 24.0;
        let ingredients = column.open(root, format!("ritual-ingredients-{id}"), rows_height);
        let ingredient_rows = (0..product.ingredients.len())
            .map(|n| column.push_under(ingredients, format!("ritual-ingredient-{id}-{}", n + 1), 40.0))
            .collect();

        let traits = column.push_under(root, format!("ritual-traits-{id}"), 24.0);
        let cta_wrapper = column.open(root, format!("ritual-cta-wrapper-{id}"), 104.0);
        let cta = column.push_under(cta_wrapper, format!("ritual-cta-{id}"), 56.0);
        let whatsapp = column.push_under(cta_wrapper, format!("ritual-whatsapp-{id}"), 24.0);
        column.scene().set_focusable(cta, true);
        column.scene().set_focusable(whatsapp, true);

        let end = top + BLOCK_HEIGHT + 120.0;
        if column.cursor() < end {
            column.skip(end - column.cursor());
        }

        Self {
            product,
            root,
            image_wrapper,
            image,
            eyebrow,
            name,
            description,
            ingredients,
            ingredient_rows,
            traits,
            cta_wrapper,
            cta,
            whatsapp,
        }
    }

    pub fn product(&self) -> &'static Product {
        self.product
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn image(&self) -> ElementId {
        self.image
    }

    /// Button that opens the ritual overlay
    pub fn cta(&self) -> ElementId {
        self.cta
    }

    /// Outbound order link
    pub fn whatsapp(&self) -> ElementId {
        self.whatsapp
    }

    pub fn ingredient_rows(&self) -> &[ElementId] {
        &self.ingredient_rows
    }

    fn text_column(&self) -> [ElementId; 6] {
        [
            self.eyebrow,
            self.name,
            self.description,
            self.ingredients,
            self.traits,
            self.cta_wrapper,
        ]
    }

    fn controlled(&self, out: &mut Vec<ElementId>) {
        out.push(self.image_wrapper);
        out.extend(self.text_column());
        out.extend(self.ingredient_rows.iter().copied());
    }

    fn animate(&self, scope: &mut Scope<'_>) -> Result<()> {
        scope.reveal_on_scroll(
            self.root,
            ScrollDefaults::START,
            Timeline::new().step(
                reveal_step([self.image_wrapper], 12.0)
                    .duration(DurationPreset::Slow.ms())
                    .ease(EasePreset::Gentle),
            ),
        );

        scope.reveal_on_scroll(
            self.root,
            TriggerPoint::new(Edge::Top, 0.7)?,
            Timeline::new().step(
                reveal_step(self.text_column(), 8.0)
                    .duration(DurationPreset::Normal.ms())
                    .ease(EasePreset::Gentle)
                    .stagger(Stagger::new(120)),
            ),
        );

        if !self.ingredient_rows.is_empty() {
            scope.reveal_on_scroll(
                self.ingredients,
                ScrollDefaults::START,
                Timeline::new().step(
                    reveal_step(self.ingredient_rows.iter().copied(), 6.0)
                        .duration(DurationPreset::Quick.ms())
                        .ease(EasePreset::Soft)
                        .stagger(Stagger::new(80)),
                ),
            );
        }

        let image = self.image;
        let hover = move |scale: f32, elevation: f32| {
            TweenSpec::to(image, Props::scale(scale).with_elevation(elevation))
                .duration(DurationPreset::Quick.ms())
                .ease(EasePreset::Soft)
                .overwrite()
        };
        scope.listen(image, event_types::POINTER_ENTER, move |_, stage| {
            if stage.viewport.is_desktop() {
                stage.tween(hover(HOVER_SCALE, 1.0));
            }
        });
        scope.listen(image, event_types::POINTER_LEAVE, move |_, stage| {
            if stage.viewport.is_desktop() {
                stage.tween(hover(1.0, 0.0));
            }
        });

        scope.observe(
            ScrollTrigger::scrub(
                self.root,
                TriggerPoint::top(1.0),
                TriggerPoint::bottom(0.0),
                Scrub::new(image, Props::translate_y(0.0), Props::translate_y(PARALLAX_PX)).lag(1000),
            )
            .media(MediaQuery::desktop()),
        );
        Ok(())
    }
}

/// The product showcase section
pub struct RitualShowcase {
    root: ElementId,
    title: ElementId,
    subtitle: ElementId,
    blocks: Vec<ProductBlock>,
    closing: ElementId,
    final_cta: ElementId,
}

impl RitualShowcase {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let mut column = Column::new(scene, "products", top, 160.0);
        let title = column.push("ritual-title", 64.0);
        let subtitle = column.push("ritual-subtitle", 28.0);
        column.skip(96.0);

        let blocks = products()
            .iter()
            .map(|product| ProductBlock::mount(&mut column, product))
            .collect();

        let closing = column.push("ritual-closing", 40.0);
        let final_cta = column.push("ritual-final-cta", 56.0);
        column.scene().set_focusable(final_cta, true);
        let root = column.finish(160.0);

        Self {
            root,
            title,
            subtitle,
            blocks,
            closing,
            final_cta,
        }
    }

    pub fn blocks(&self) -> &[ProductBlock] {
        &self.blocks
    }

    /// Block whose overlay button is `id`
    pub fn block_for_cta(&self, id: ElementId) -> Option<&ProductBlock> {
        self.blocks.iter().find(|b| b.cta == id)
    }

    /// Block whose order link is `id`
    pub fn block_for_link(&self, id: ElementId) -> Option<&ProductBlock> {
        self.blocks.iter().find(|b| b.whatsapp == id)
    }

    pub fn final_cta(&self) -> ElementId {
        self.final_cta
    }
}

impl Section for RitualShowcase {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        let mut ids = vec![self.title, self.subtitle];
        for block in &self.blocks {
            block.controlled(&mut ids);
        }
        ids.extend([self.closing, self.final_cta]);
        ids
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }

        rt.scope(|scope| {
            let eighty = TriggerPoint::new(Edge::Top, 0.8)?;
            let pair = |first: ElementId, second: ElementId, delay: u32| {
                Timeline::new()
                    .step(
                        reveal_step([first], 12.0)
                            .duration(DurationPreset::Normal.ms())
                            .ease(EasePreset::Gentle),
                    )
                    .step_at(
                        reveal_step([second], 12.0)
                            .duration(DurationPreset::Normal.ms())
                            .ease(EasePreset::Gentle),
                        Position::At(delay),
                    )
            };

            scope.reveal_on_scroll(self.root, eighty, pair(self.title, self.subtitle, 200));
            for block in &self.blocks {
                block.animate(scope)?;
            }
            scope.reveal_on_scroll(self.closing, eighty, pair(self.closing, self.final_cta, 150));
            Ok::<_, SiteError>(())
        })
    }
}

use std::rc::Rc;
use std::sync::Once;

use showcase_core::{LayoutSettings, ProjectDescriptor, ShowcaseSettings};
use showcase_engine::classes::CONTENT_REGION;
use showcase_engine::fake::FakeSurface;
use showcase_engine::{
    init_responsive, is_responsive_initialized, relayout_all, EmbedBuilder, EventKind, NodeId,
    Surface, SurfaceRef, Target,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(showcase_logging::initialize_for_tests);
}

fn page_with_embeds(count: usize) -> (Rc<FakeSurface>, SurfaceRef, Vec<NodeId>) {
    let fake = FakeSurface::shared();
    let surface: SurfaceRef = fake.clone();
    let builder = EmbedBuilder::new(surface.clone(), &ShowcaseSettings::default());
    let regions = (0..count)
        .map(|index| {
            let embed = builder
                .build(&ProjectDescriptor::new(
                    format!("Project {index}"),
                    "https://atlas.example/",
                ))
                .expect("builds");
            fake.append_child(fake.body(), embed);
            fake.query_within(embed, &format!(".{CONTENT_REGION}"))[0]
        })
        .collect();
    (fake, surface, regions)
}

fn heights(fake: &FakeSurface, regions: &[NodeId]) -> Vec<String> {
    regions
        .iter()
        .map(|region| fake.style(*region, "height").unwrap_or_default())
        .collect()
}

// The install guard is per thread, and every test runs on its own thread.
#[test]
fn second_initialization_installs_nothing() {
    init_logging();
    let (fake, surface, _) = page_with_embeds(1);
    let settings = ShowcaseSettings::default();

    assert!(!is_responsive_initialized());
    assert!(init_responsive(&surface, &settings));
    assert!(is_responsive_initialized());
    assert!(!init_responsive(&surface, &settings));

    assert_eq!(fake.listener_count(Target::Window, EventKind::Resize), 1);
}

#[test]
fn resize_burst_relayouts_once_after_the_quiet_period() {
    init_logging();
    let (fake, surface, regions) = page_with_embeds(2);
    init_responsive(&surface, &ShowcaseSettings::default());
    assert_eq!(heights(&fake, &regions), vec!["600px", "600px"]);

    fake.resize_viewport(700.0);
    fake.advance_ms(200);
    fake.resize_viewport(400.0);
    fake.advance_ms(200);
    assert_eq!(heights(&fake, &regions), vec!["600px", "600px"]);

    fake.advance_ms(50);
    assert_eq!(heights(&fake, &regions), vec!["450px", "450px"]);
    assert!(regions.iter().all(|region| fake.has_class(*region, "mobile")));
    assert!(regions.iter().all(|region| !fake.has_class(*region, "desktop")));
}

#[test]
fn relayout_moves_between_every_breakpoint() {
    init_logging();
    let (fake, _surface, regions) = page_with_embeds(1);
    let layout = LayoutSettings::default();
    let region = regions[0];

    for (width, class, height) in [
        (481.0, "tablet", "500px"),
        (769.0, "desktop", "600px"),
        (320.0, "mobile", "450px"),
    ] {
        fake.resize_viewport(width);
        assert_eq!(relayout_all(&*fake, &layout), 1);
        assert_eq!(
            fake.classes(region)
                .iter()
                .filter(|c| ["mobile", "tablet", "desktop"].contains(&c.as_str()))
                .cloned()
                .collect::<Vec<_>>(),
            vec![class.to_string()]
        );
        assert_eq!(fake.style(region, "max-height").as_deref(), Some(height));
    }
}

#[test]
fn relayout_with_no_embeds_touches_nothing() {
    init_logging();
    let fake = FakeSurface::shared();
    fake.reset_mutations();

    assert_eq!(relayout_all(&*fake, &LayoutSettings::default()), 0);
    assert_eq!(fake.mutation_count(), 0);
}

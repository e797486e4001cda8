//! Generate annotated sentences from a few built-in articles.
//!
//! ```text
//! RUST_LOG=debug cargo run --example generate -- 10 42
//! ```
//!
//! Arguments are the number of sentences and an optional seed.

use dialectic_engine::{
    Article, Generator, GeneratorConfig, LexiconAccentor, MemorySource, Profile,
};
use std::sync::Arc;

fn articles() -> Vec<Article> {
    vec![
        Article::builder("Москва")
            .paragraph(
                "Москва\u{00A0}— столица России (с 1918 года), крупнейший город страны[1]. \
                 Город стоит на реке Москве в центре Восточно-Европейской равнины.",
            )
            .heading("История", 2)
            .paragraph("Город основан в 1147 году. Старый центр очень большой, там музей и площадь.")
            .heading("Примечания", 2)
            .paragraph("Ссылки на источники не попадают в результат.")
            .build(),
        Article::builder("Волга")
            .paragraph("Волга — река в России, она течёт через город и поле к морю.")
            .heading("География", 2)
            .paragraph("На берегу реки стоит новая школа, а между деревьями дорога на север.")
            .heading("Притоки", 3)
            .paragraph("Мама читала книгу, папа сидел у окна. Было поздно!")
            .build(),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let amount: usize = args.next().map(|a| a.parse()).transpose()?.unwrap_or(10);
    let seed: Option<u64> = args.next().map(|a| a.parse()).transpose()?;

    let config = GeneratorConfig::builder().max_idle_rounds(20).build()?;
    let accentor = Arc::new(LexiconAccentor::russian(Profile::russian()?)?);

    let mut generator = match seed {
        Some(seed) => Generator::with_seed(config, accentor, seed)?,
        None => Generator::new(config, accentor)?,
    };
    let mut source = MemorySource::new(articles()).cycle(true);

    for sentence in generator.generate(&mut source, amount)? {
        println!("{sentence}");
    }
    Ok(())
}

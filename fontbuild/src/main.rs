use std::{fs, io::Write};

use clap::Parser;
use fontbuild::{build, ufo, Args, BuildConfig, Error};
use log::info;

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{ts}: {style}{}{style:#}: {}",
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::default(),
    };
    args.apply(&mut config);

    let mut ufo = ufo::load(&args.source)?;
    let mut font = ufo::to_ir(&ufo);
    let report = build(&mut font, &config)?;
    ufo::apply(&mut ufo, &font, &report.glyphs.created)?;

    let output = args.output.as_ref().unwrap_or(&args.source);
    ufo::save(&ufo, output)?;
    if let Some(path) = &args.dump_ir {
        fs::write(path, font.to_yaml()?).map_err(|source| Error::FileIo {
            path: path.clone(),
            source,
        })?;
    }
    info!("{report}");
    Ok(())
}

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("colorbook {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: colorbook");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "acb: version {}, signature {}",
        colorbook_codec::VERSION,
        String::from_utf8_lossy(&colorbook_codec::SIGNATURE)
    );
    println!(
        "color_spaces: {}",
        colorbook_codec::ColorSpace::ALL
            .iter()
            .map(|space| format!("{space}={}", space.id()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "features: schema={}, async={}, cli=true",
        cfg!(feature = "schema"),
        cfg!(feature = "async")
    );

    Ok(SUCCESS)
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::fileformat::sam::{AlignmentShape, SamParseOptions};
use crate::umi::{GeneUmiCounter, PipeStats, SamAlignmentPipe, GENE_UMI_PREFERRED_TAGS};
use crate::utils::{create_buffered, open_buffered, parse_toggle, LineEnding, LineReader};

/// Commandline option: Keep one alignment per gene and UMI in a featureCounts-annotated SAM file.
/// Toggles are given as 0/1 or true/false, in order
#[derive(Args)]
pub struct CountCMD {
    /// Input SAM file, with composite DGE read names
    #[arg(value_parser)]
    pub path_in: PathBuf,

    /// Output SAM file
    #[arg(value_parser)]
    pub path_out: PathBuf,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "0")]
    pub parse_header_line: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "0")]
    pub parse_header_fields: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "0")]
    pub parse_header_fields_attribs: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "1")]
    pub parse_align_line: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "0")]
    pub parse_mand_align_fields: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "1")]
    pub parse_opt_align_fields: bool,

    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "0")]
    pub parse_opt_align_fields_attribs: bool,

    /// Only parse the XS, XN and XT optional fields
    #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set, default_value = "1")]
    pub use_pref_opt_fields: bool,

    /// unix, windows or macintosh
    #[arg(default_value = "unix")]
    pub line_ending: LineEnding,
}

impl CountCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let opts = SamParseOptions {
            parse_header_line: self.parse_header_line,
            parse_header_fields: self.parse_header_fields,
            parse_header_fields_attribs: self.parse_header_fields_attribs,
            parse_align_line: self.parse_align_line,
            parse_mand_align_fields: self.parse_mand_align_fields,
            parse_opt_align_fields: self.parse_opt_align_fields,
            parse_opt_align_fields_attribs: self.parse_opt_align_fields_attribs,
            use_preferred_tags: self.use_pref_opt_fields,
            shape: AlignmentShape::CompositedDgeFeatureCounts,
            ..SamParseOptions::default()
        }
        .with_preferred_tags(GENE_UMI_PREFERRED_TAGS);

        let params = CountParams {
            path_in: self.path_in.clone(),
            path_out: self.path_out.clone(),
            opts,
            line_ending: self.line_ending,
        };

        let stats = Count::run(&params)?;
        for line in stats.to_string().lines() {
            log::info!("{}", line);
        }
        log::info!("Count has finished succesfully");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CountParams {
    pub path_in: PathBuf,
    pub path_out: PathBuf,
    pub opts: SamParseOptions,
    pub line_ending: LineEnding,
}

pub struct Count {}

impl Count {
    ///////////////////////////////
    /// Stream the SAM file through the gene/UMI counter
    pub fn run(params: &CountParams) -> Result<PipeStats> {
        GeneUmiCounter::check_options(&params.opts)?;
        let pipe = SamAlignmentPipe::new(params.opts.clone())?;

        let mut input = LineReader::new(open_buffered(&params.path_in)?, params.line_ending);
        let mut output = create_buffered(&params.path_out)?;
        let mut counter = GeneUmiCounter::new();

        let stats = pipe.run(&mut input, &mut output, &mut counter)?;
        log::debug!("Kept {} distinct gene/UMI pairs", counter.unique_count());
        Ok(stats)
    }
}

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::fileformat::sam::SamParseOptions;
use crate::umi::{InfoPrinter, PipeStats, SamAlignmentPipe};
use crate::utils::{create_buffered, open_buffered, LineEnding, LineReader};

/// Commandline option: Describe every line of a SAM file, including decoded composite read names
#[derive(Args)]
pub struct InspectCMD {
    /// Input SAM file
    #[arg(value_parser)]
    pub path_in: PathBuf,

    /// Report file; standard output if not given
    #[arg(short = 'o', value_parser)]
    pub path_out: Option<PathBuf>,

    /// Also check tags and values against the SAM grammar
    #[arg(long = "strict")]
    pub strict: bool,

    #[arg(long = "line-ending", default_value = "unix")]
    pub line_ending: LineEnding,
}

impl InspectCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let params = InspectParams {
            path_in: self.path_in.clone(),
            path_out: self.path_out.clone(),
            opts: SamParseOptions {
                parse_header_line: true,
                parse_header_fields: true,
                parse_header_fields_attribs: self.strict,
                parse_align_line: true,
                parse_mand_align_fields: true,
                parse_opt_align_fields: true,
                parse_opt_align_fields_attribs: self.strict,
                use_preferred_tags: false,
                ..SamParseOptions::default()
            },
            line_ending: self.line_ending,
        };
        let stats = Inspect::run(&params)?;
        let described =
            stats.header_data.aux + stats.header_comment.aux + stats.alignment.aux;
        log::info!("Described {} of {} lines", described, stats.total_read());
        log::info!("Inspect has finished succesfully");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct InspectParams {
    pub path_in: PathBuf,
    pub path_out: Option<PathBuf>,
    pub opts: SamParseOptions,
    pub line_ending: LineEnding,
}

pub struct Inspect {}

impl Inspect {
    pub fn run(params: &InspectParams) -> Result<PipeStats> {
        let pipe = SamAlignmentPipe::new(params.opts.clone())?;
        let mut input = LineReader::new(open_buffered(&params.path_in)?, params.line_ending);

        let report: Box<dyn Write> = match &params.path_out {
            Some(p) => Box::new(create_buffered(p)?),
            None => Box::new(std::io::stdout().lock()),
        };
        let mut printer = InfoPrinter::new(report);
        let stats = pipe.run(&mut input, &mut std::io::sink(), &mut printer)?;
        printer.into_inner().flush()?;
        Ok(stats)
    }
}

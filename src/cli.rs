use crate::converter::{DEFAULT_QUALITY, DEFAULT_SQUARE_SIZE};
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_square_size_argument(command);
        let command = Self::register_quality_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_square_size_argument(command: Command) -> Command {
        command.arg(Self::create_square_size_argument())
    }

    fn register_quality_argument(command: Command) -> Command {
        command.arg(Self::create_quality_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to JPEG input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to JPEG output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    // Values of 2 and below are rejected by the converter.
    fn create_square_size_argument() -> Arg {
        arg!(square_size: -s --square_size <PIXELS> "Side length of a pixel art square")
            .default_value(DEFAULT_SQUARE_SIZE.to_string())
            .value_parser(value_parser!(u32))
    }

    fn create_quality_argument() -> Arg {
        arg!(quality: -q --quality <QUALITY> "JPEG quality of the output image")
            .default_value(DEFAULT_QUALITY.to_string())
            .value_parser(value_parser!(u8).range(1..=100))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            square_size: Self::extract_square_size_argument(matches),
            quality: Self::extract_quality_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_square_size_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("square_size")
            .expect("Square size must be provided, but was unset.")
            .to_owned()
    }

    fn extract_quality_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("quality")
            .expect("Quality must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::CLIParser;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "testfile.jpg";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "testfile.jpg";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_square_size_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_square_size_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--square_size", "16"]);
        assert_eq!(CLIParser::extract_square_size_argument(&matches), 16);
    }

    #[test]
    fn parse_square_size_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_square_size_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-s", "-4"]);
        assert!(result.is_err(), "Negative square size not detected");
    }

    #[test]
    fn parse_quality_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_quality_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-q", "90"]);
        assert_eq!(CLIParser::extract_quality_argument(&matches), 90);
    }

    #[test]
    fn parse_quality_out_of_range_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_quality_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--quality", "0"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for quality not detected");
        }
    }

    #[test]
    fn parse_number_of_threads_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--threads", "5"]);
        let actual = CLIParser::extract_threads_argument(&matches);
        let expected = 5;
        assert_eq!(actual, expected);
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "inputfile.jpg";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let output_file_name = "outputfile.jpg";
        let output_file_path = format!("/output_directory/{}", output_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            &input_file_path,
            &output_file_path,
            "-t",
            "8",
        ]);
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            output_file_name,
            "output file does not match"
        );
        assert_eq!(arguments.square_size, 10, "square_size does not match");
        assert_eq!(arguments.quality, 75, "quality does not match");
        assert_eq!(
            arguments.number_of_threads, 8,
            "number_of_threads does not match"
        );
    }
}

use gumdrop::Options;

#[derive(Default, Options)]
pub struct CliStart {
    #[options(help_flag, help = "print help message")]
    pub help: bool,
    #[options(help = "show program version number")]
    pub version: bool,
    #[options(
        free,
        help = "up to nine palette integers <R G B  R G B  R G B>, missing values are zero"
    )]
    pub colours: Vec<String>,
}

struct Flag {
    name: String,
    is_used: bool,
}

// the verb and file names are positional; anything starting with -- is a flag
pub struct ArgumentParser {
    positionals: Vec<String>,
    flags: Vec<Flag>,
}

impl ArgumentParser {
    pub fn new() -> ArgumentParser {
        ArgumentParser::from_args(std::env::args().skip(1).collect())
    }

    pub fn from_args(args: Vec<String>) -> ArgumentParser {
        let mut positionals: Vec<String> = Vec::new();
        let mut flags: Vec<Flag> = Vec::new();

        for arg in args {
            if arg.starts_with("--") {
                flags.push(Flag {
                    name: arg,
                    is_used: false,
                });
            } else {
                positionals.push(arg);
            }
        }

        ArgumentParser { positionals, flags }
    }

    pub fn verb(&self) -> Option<&str> {
        self.positionals.first().map(|s| s.as_str())
    }

    // positional arguments after the verb
    pub fn get_parameter(&self, index: usize) -> Option<&str> {
        self.positionals.get(index + 1).map(|s| s.as_str())
    }

    pub fn has_flag(&mut self, flag: &str) -> bool {
        for elt in &mut self.flags {
            if flag == elt.name {
                elt.is_used = true;
                return true;
            }
        }

        false
    }

    pub fn unused_flags(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|elt| !elt.is_used)
            .map(|elt| elt.name.as_str())
            .collect()
    }
}

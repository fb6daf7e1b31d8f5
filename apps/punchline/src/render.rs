use std::fmt;

use crate::models::{ComedyBit, GeneratedRoutine};

/// Renders a routine as a plain-text set list: opener, each bit with its notes, closer.
pub fn render_routine(routine: &GeneratedRoutine) -> String {
    SetList(routine).to_string()
}

struct SetList<'a>(&'a GeneratedRoutine);

impl fmt::Display for SetList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routine = self.0;
        writeln!(f, "OPENER")?;
        writeln!(f, "  {}", routine.opener)?;
        for bit in &routine.bits {
            writeln!(f)?;
            write_bit(f, bit)?;
        }
        writeln!(f, "\nCLOSER")?;
        writeln!(f, "  {}", routine.closer)
    }
}

fn write_bit(f: &mut fmt::Formatter<'_>, bit: &ComedyBit) -> fmt::Result {
    writeln!(f, "#{} {}", bit.id, bit.title)?;
    writeln!(f, "  Setup:     {}", bit.setup)?;
    writeln!(f, "  Punchline: {}", bit.punchline)?;
    writeln!(f, "  Act-out:   {}", bit.act_out)?;
    writeln!(f, "  Coaching:  {}", bit.coaching_tip)
}

use std::fmt::Write;

use crate::app::{InputId, Inputs, OutputId};
use crate::color;
use crate::ui::html::escape;
use crate::ui::options::{AGE_OPTIONS, COUNTRY_OPTIONS, VARIABLE_OPTIONS};

const STYLESHEET: &str = "https://codepen.io/chriddyp/pen/bWLwgP.css";

// ---------------------------------------------------------------------------
// Page scaffolding
// ---------------------------------------------------------------------------

/// The whole single page. `outputs` holds the pre-rendered region contents.
pub fn render_page(inputs: &Inputs, outputs: &[(OutputId, String)]) -> String {
    let region = |id: OutputId| {
        outputs
            .iter()
            .find(|(o, _)| *o == id)
            .map(|(_, html)| html.as_str())
            .unwrap_or("")
    };
    let heading = color::hex(color::HEADING);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>FedExCup Dashboard</title>
<link rel="stylesheet" href="{STYLESHEET}">
<style>
  h2, h3 {{ color: {heading}; }}
  .half {{ width: 48%; display: inline-block; vertical-align: top; }}
  .gap {{ width: 2%; display: inline-block; }}
  .note {{ color: red; }}
  .chart-error {{ color: {error}; border: 1px solid {error}; padding: 1em; }}
  #{table_div} table {{ width: 100%; }}
</style>
</head>
<body>
<h2>How do PGA Players' Strengths impact their FedExCup Points?</h2>
<p>Have you ever wondered what makes the best golfers in the world so good? This dashboard will help you get an idea of the variables that mean the most when it comes to competing on the PGA Tour.</p>
<hr>
"#,
        error = color::hex(color::ERROR),
        table_div = OutputId::TableDiv.as_str(),
    );

    out.push_str(INTRODUCTION);
    out.push_str(r#"<div class="gap"></div>"#);
    out.push_str(KEY_STATISTICS);
    out.push_str("<hr>\n");

    out.push_str(r#"<div class="half">"#);
    out.push_str("<h3>FedExCup Points Based on Key Player Stats</h3>\n");
    controls(&mut out, inputs);
    out.push_str("</div>\n");
    out.push_str(r#"<div class="gap"></div>"#);
    let _ = write!(
        out,
        r#"<div class="half" style="text-align: right;"><div id="{}">{}</div></div>
<hr>
<h3>Table of Players in Selected Age Range and Countries - Sorted By FedExCup Points</h3>
<div id="{}">{}</div>
"#,
        OutputId::PgaPlot.as_str(),
        region(OutputId::PgaPlot),
        OutputId::TableDiv.as_str(),
        region(OutputId::TableDiv),
    );

    out.push_str("<script>\n");
    let ids: Vec<String> = InputId::ALL.iter().map(|id| format!("\"{}\"", id.as_str())).collect();
    let _ = writeln!(out, "const CONTROLS = [{}];", ids.join(", "));
    out.push_str(UPDATE_SCRIPT);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

fn controls(out: &mut String, inputs: &Inputs) {
    out.push_str("<h6>Choose the variable you would like to see in relation to FedExCup Points:</h6>\n");
    let _ = write!(
        out,
        r#"<select id="{}" style="width: 325px; text-align: center;">"#,
        InputId::VariableDropdown.as_str()
    );
    for opt in VARIABLE_OPTIONS {
        option(out, opt.value.column(), opt.label, inputs.variable == opt.value.column());
    }
    out.push_str("</select>\n");

    out.push_str("<h6>Choose the countries of the players you would like to see displayed: (Refresh to reselect all)</h6>\n");
    let _ = write!(
        out,
        r#"<select id="{}" multiple size="8" style="width: 100%;">"#,
        InputId::CountryChecklist.as_str()
    );
    for opt in COUNTRY_OPTIONS {
        option(out, opt.value, opt.label, inputs.countries.contains(opt.value));
    }
    out.push_str("</select>\n");

    out.push_str("<h6>Choose a minimum player age to be included:</h6>\n");
    age_select(out, InputId::MinAgeChecklist, inputs.min_age);
    out.push_str("<h6>Choose a maximum player age to be included:</h6>\n");
    age_select(out, InputId::MaxAgeChecklist, inputs.max_age);
}

fn age_select(out: &mut String, id: InputId, selected: i64) {
    let _ = write!(out, r#"<select id="{}" style="width: 75px;">"#, id.as_str());
    for age in AGE_OPTIONS {
        let value = age.to_string();
        option(out, &value, &value, age == selected);
    }
    out.push_str("</select>\n");
}

fn option(out: &mut String, value: &str, label: &str, selected: bool) {
    let _ = write!(
        out,
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    );
}

// ---------------------------------------------------------------------------
// Static prose
// ---------------------------------------------------------------------------

const INTRODUCTION: &str = r#"<div class="half">
<h3>Introduction to the PGA and FedExCup:</h3>
<p>In the PGA, the best players in the world compete in weekend long tournaments throughout the year. They play at different golf courses every weekend and each golf course has its own challenges. Each course has a par score, which is the number of strokes that the course sets as a standard. A golfer's objective is to score the lowest score that he or she can on the course. To score well, a player must be playing all aspects of the game well (driving the ball off the tee, hitting the ball onto the green, chipping around the green, and putting the ball. If you are not familiar with how the game of golf works the following link will explain to you the basics:</p>
<a href="https://simple.wikipedia.org/wiki/Golf">Basic introduction to the game of golf</a>
<br><br>
<p>The FedExCup is an overarching contest that is won by the best overall tournament player for any given season. According to the PGA, 'the FedExCup is a season-long points competition offering unprecedented bonus money and culminating with the FedExCup Playoffs in August.' Players obtain more FedExCup points the higher they place in any given tournament. Therefore, a player's FedExCup points at any point during a season is a great measure of how well he or she is doing overall in the current season's tournament play. For this dashboard we are focusing on men's PGA.</p>
<a href="https://www.pgatour.com/fedexcup/fedexcup-overview.html" target="_blank">Click here for more detailed information on the FedExCup</a>
</div>
"#;

const KEY_STATISTICS: &str = r#"<div class="half">
<h3>Key Statistics in Golf:</h3>
<p>Before describing the key statistics in golf, we first have to define some basic terms. First of all, all distances in golf are measured in yards. Any number that is distance oriented (such as average drive distance) is measured in yards. Par is a term that describes the number of strokes it should take you to get the ball in the hole from the first to last shot. Hitting a green in regulation means that you are on the green after hitting ball two time less than par. For example, on a par 4 hitting a green in regulation means that it took you 2 strokes to get the ball on the green. Another term is sand save, which is when a player hits his or her ball out of a greenside bunker and hits the next shot into the hole. Now that we have defined these terms, we can present the statistics used in this dashboard:</p>
<ul><ul>
<li>Average Driving Distance: the average distance of all shots hit with a player's driver</li>
<li>Average Putts Per Hole: the average number of putts that a player has on each hole</li>
<li>Driving Accuracy Percentage: the number of fairways hit off the tee / total tee shots</li>
<li>Greens in Regulation Percentage: greens hit in regulation / total holes played</li>
<li>Sand Save Percentage: number of sand saves / total number of sand shots</li>
</ul></ul>
<p>This dashboard allows you to choose which variable listed above you would like to see displayed on a regression model in relation with players' FedExCup points. This will allow you to see how tour players' strengths affect how well they do in tournament play (the higher number of FedExCup points a player has, the better he is in tournament play). The players' countries of origins and ages are also included in the data to interact with. You can choose countries of origin that you would like to see as well as an age range.</p>
<ul><ul>
<li class="note">Important Note: some players do not have a specified age, so their age is replaced with the average age of PGA players (35)</li>
</ul></ul>
<p>These statistics were scraped off the ESPN website:</p>
<a href="https://www.espn.com/golf/statistics/_/sort/cupPoints" target="_blank">Click here to go to ESPN Site</a>
</div>
"#;

/// Posts each change of a `CONTROLS` entry to `/_update` and swaps in the returned regions.
const UPDATE_SCRIPT: &str = r#"
function readInputs() {
  const countries = Array.from(document.getElementById("country_checklist").selectedOptions)
    .map((o) => o.value);
  return {
    variable_dropdown: document.getElementById("variable_dropdown").value,
    country_checklist: countries,
    min_age_checklist: parseInt(document.getElementById("min_age_checklist").value, 10),
    max_age_checklist: parseInt(document.getElementById("max_age_checklist").value, 10),
  };
}

let pending = Promise.resolve();

function update(changed) {
  // Chain requests so regions are replaced in the order controls changed.
  pending = pending.then(async () => {
    const response = await fetch("/_update", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ changed: changed, inputs: readInputs() }),
    });
    if (!response.ok) {
      console.error("update failed", response.status, await response.text());
      return;
    }
    const body = await response.json();
    for (const [id, html] of Object.entries(body.outputs)) {
      document.getElementById(id).innerHTML = html;
    }
  }).catch((err) => console.error(err));
}

for (const id of CONTROLS) {
  document.getElementById(id).addEventListener("change", () => update([id]));
}
"#;

use crate::model::AggregationResult;
use crate::util::{human_date, repository_url};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub owner: String,
    pub name: String,
    pub chart: Option<String>,
    pub generated_at: DateTime<Utc>,
}

pub fn render(result: &AggregationResult, ctx: &ReportContext) -> String {
    let mut out = format!(
        "\n# Hi, I'm {}\n\n\
         Welcome to my GitHub profile. Here's a summary of my repository statistics, updated automatically.\n\n\
         ---\n\n\
         ### Repository Stats\n\n\
         My repositories have been cloned **{}** times in total since {}.\n\n",
        ctx.name,
        result.total,
        human_date(&result.start_date)
    );

    if let Some(chart) = &ctx.chart {
        out.push_str(&format!("![Clone History]({chart})\n\n"));
    }

    let heading = result.metric.heading();
    out.push_str(&format!("### Top {} Cloned Repositories\n\n", result.top.len()));
    out.push_str(&format!("| Rank | Repository | {heading} |\n"));
    out.push_str(&format!("|------|------------|{}|\n", "-".repeat(heading.len() + 2)));
    for (index, entry) in result.top.iter().enumerate() {
        out.push_str(&format!(
            "| {} | [{}]({}) | {} |\n",
            index + 1,
            entry.repository,
            repository_url(&ctx.owner, &entry.repository),
            entry.value
        ));
    }

    out.push_str(&format!(
        "\n---\n\n*Last updated: {}*",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metric, RankingEntry};
    use crate::util::parse_timestamp;
    use pretty_assertions::assert_eq;

    fn result() -> AggregationResult {
        AggregationResult {
            metric: Metric::ClonesUnique,
            total: 23,
            start_date: parse_timestamp("2025-06-01T07:00:00Z").unwrap(),
            top: vec![
                RankingEntry {
                    repository: "repoB".to_string(),
                    value: 15,
                },
                RankingEntry {
                    repository: "repoA".to_string(),
                    value: 8,
                },
            ],
            daily_series: None,
        }
    }

    fn ctx(chart: Option<&str>) -> ReportContext {
        ReportContext {
            owner: "octo".to_string(),
            name: "Octo".to_string(),
            chart: chart.map(str::to_string),
            generated_at: parse_timestamp("2025-06-10T12:34:56Z").unwrap(),
        }
    }

    #[test]
    fn renders_full_document() {
        let doc = render(&result(), &ctx(None));
        let expected = "
# Hi, I'm Octo

Welcome to my GitHub profile. Here's a summary of my repository statistics, updated automatically.

---

### Repository Stats

My repositories have been cloned **23** times in total since June 1, 2025.

### Top 2 Cloned Repositories

| Rank | Repository | Unique Clones |
|------|------------|---------------|
| 1 | [repoB](https://github.com/octo/repoB) | 15 |
| 2 | [repoA](https://github.com/octo/repoA) | 8 |

---

*Last updated: 2025-06-10 12:34:56 UTC*";
        assert_eq!(doc, expected);
    }

    #[test]
    fn embeds_chart_when_present() {
        let doc = render(&result(), &ctx(Some("clones_history.svg")));
        assert!(doc.contains("![Clone History](clones_history.svg)\n\n### Top 2"));
    }
}

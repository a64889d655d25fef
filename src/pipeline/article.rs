//! Built-in blog-article pipeline: plan, write, edit

use super::{Pipeline, StageSpec};
use crate::llm::Persona;

/// Topic used when the caller supplies none
pub const DEFAULT_TOPIC: &str = "Artificial Intelligence";

/// Build the three-stage article pipeline.
///
/// Role-playing personas noticeably improve generation quality, so each
/// stage frames the model as a specialist handing work to the next one:
/// a content planner, a content writer, and an editor.
pub fn article_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new();

    pipeline.add_stage(StageSpec::new(
        "plan",
        Persona::new(
            "Content Planner",
            "Plan engaging and factually accurate content on {topic}",
            "You're working on planning a blog article \
             about the topic: {topic}. \
             You collect information that helps the \
             audience learn something \
             and make informed decisions. \
             Your work is the basis for \
             the Content Writer to write an article on this topic.",
        ),
        "1. Prioritize the latest trends, key players, \
         and noteworthy news on {topic}.\n\
         2. Identify the target audience, considering \
         their interests and pain points.\n\
         3. Develop a detailed content outline including \
         an introduction, key points, and a call to action.\n\
         4. Include SEO keywords and relevant data or sources.",
        "A comprehensive content plan document \
         with an outline, audience analysis, \
         SEO keywords, and resources.",
    ));

    pipeline.add_stage(StageSpec::new(
        "write",
        Persona::new(
            "Content Writer",
            "Write insightful and factually accurate \
             opinion piece about the topic: {topic}",
            "You're working on writing \
             a new opinion piece about the topic: {topic}. \
             You base your writing on the work of \
             the Content Planner, who provides an outline \
             and relevant context about the topic. \
             You follow the main objectives and \
             direction of the outline, \
             as provided by the Content Planner. \
             You also provide objective and impartial insights \
             and back them up with information \
             provided by the Content Planner. \
             You acknowledge in your opinion piece \
             when your statements are opinions \
             as opposed to objective statements.",
        ),
        "1. Use the content plan to craft a compelling \
         blog post on {topic}.\n\
         2. Incorporate SEO keywords naturally.\n\
         3. Sections/Subtitles are properly named \
         in an engaging manner.\n\
         4. Ensure the post is structured with an \
         engaging introduction, insightful body, \
         and a summarizing conclusion.\n\
         5. Proofread for grammatical errors and \
         alignment with the brand's voice.",
        "A well-written blog post \
         in markdown format, ready for publication, \
         each section should have 2 or 3 paragraphs.",
    ));

    pipeline.add_stage(StageSpec::new(
        "edit",
        Persona::new(
            "Editor",
            "Edit a given blog post to align with \
             the writing style of the organization.",
            "You are an editor who receives a blog post \
             from the Content Writer. \
             Your goal is to review the blog post \
             to ensure that it follows journalistic best practices, \
             provides balanced viewpoints \
             when providing opinions or assertions, \
             and also avoids major controversial topics \
             or opinions when possible.",
        ),
        "Proofread the given blog post for \
         grammatical errors and \
         alignment with the brand's voice.",
        "A well-written blog post in markdown format, \
         ready for publication, \
         each section should have 2 or 3 paragraphs.",
    ));

    pipeline
}
